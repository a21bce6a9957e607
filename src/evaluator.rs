use crate::cards::{Card, Rank};
use std::fmt;

/// Poker hand categories, weakest to strongest. The discriminant is the
/// conventional 1..=10 strength value; a Royal Flush is its own category at
/// the top rather than a straight flush special case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// A scored hand: category plus the ordered kickers that break ties inside
/// the category. Comparison is lexicographic, category first, then kickers
/// element-wise.
///
/// The kicker list shape depends on the category: quads report
/// `[quad rank, kicker]`, a full house `[triple, pair]`, trips
/// `[triple, k1, k2]`, two pair `[high pair, low pair, kicker]`, one pair
/// `[pair, k1, k2, k3]`, and straights, flushes, and high cards their five
/// ranks high-to-low. The wheel reports `[5, 4, 3, 2, A]` so its lead
/// kicker is Five.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore {
    pub category: Category,
    pub kickers: Vec<Rank>,
}

impl HandScore {
    pub fn new(category: Category, kickers: Vec<Rank>) -> Self {
        Self { category, kickers }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.kickers;
        match self.category {
            Category::RoyalFlush => write!(f, "a Royal Flush"),
            Category::StraightFlush => {
                write!(f, "a {} High Straight Flush", k[0].name())
            }
            Category::FourOfAKind => write!(f, "Four {}", k[0].plural()),
            Category::FullHouse => {
                write!(f, "a Full House, {} over {}", k[0].plural(), k[1].plural())
            }
            Category::Flush => write!(f, "a {} High Flush", k[0].name()),
            Category::Straight => write!(f, "a {} High Straight", k[0].name()),
            Category::ThreeOfAKind => write!(f, "Three {}", k[0].plural()),
            Category::TwoPair => {
                write!(f, "Two Pair, {} and {}", k[0].plural(), k[1].plural())
            }
            Category::OnePair => write!(f, "a Pair of {}", k[0].plural()),
            Category::HighCard => write!(f, "{} High", k[0].name()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("need at least 5 cards to evaluate, got {0}")]
    TooFewCards(usize),
    #[error("at most 7 cards can be evaluated, got {0}")]
    TooManyCards(usize),
    #[error("duplicate card in input: {0}")]
    DuplicateCard(Card),
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandScore {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    // Distinct rank values, ascending.
    let uniq: Vec<u8> = (2u8..=14).filter(|&v| counts[v as usize] > 0).collect();
    let is_wheel = uniq == [2, 3, 4, 5, 14];
    let is_run = uniq.len() == 5 && uniq.windows(2).all(|w| w[1] == w[0] + 1);

    if is_wheel || is_run {
        let kickers = if is_wheel {
            vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
        } else {
            uniq.iter().rev().filter_map(|&v| Rank::from_value(v)).collect()
        };
        let category = if is_flush {
            if kickers[0] == Rank::Ace {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            }
        } else {
            Category::Straight
        };
        return HandScore::new(category, kickers);
    }

    // Rank groups sorted by count descending, then rank descending.
    let mut groups: Vec<(Rank, u8)> = uniq
        .iter()
        .rev()
        .filter_map(|&v| Rank::from_value(v).map(|r| (r, counts[v as usize])))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let singles = |groups: &[(Rank, u8)]| -> Vec<Rank> {
        let mut out: Vec<Rank> =
            groups.iter().filter(|&&(_, c)| c == 1).map(|&(r, _)| r).collect();
        out.sort_by(|a, b| b.cmp(a));
        out
    };

    match groups[0] {
        (quad, 4) => {
            let kicker = groups[1].0;
            HandScore::new(Category::FourOfAKind, vec![quad, kicker])
        }
        (trips, 3) if groups[1].1 == 2 => {
            HandScore::new(Category::FullHouse, vec![trips, groups[1].0])
        }
        _ if is_flush => {
            let mut kickers: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
            kickers.sort_by(|a, b| b.cmp(a));
            HandScore::new(Category::Flush, kickers)
        }
        (trips, 3) => {
            let rest = singles(&groups);
            HandScore::new(Category::ThreeOfAKind, vec![trips, rest[0], rest[1]])
        }
        (hi_pair, 2) if groups[1].1 == 2 => {
            let kicker = groups[2].0;
            HandScore::new(Category::TwoPair, vec![hi_pair, groups[1].0, kicker])
        }
        (pair, 2) => {
            let rest = singles(&groups);
            HandScore::new(Category::OnePair, vec![pair, rest[0], rest[1], rest[2]])
        }
        _ => {
            let mut kickers: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
            kickers.sort_by(|a, b| b.cmp(a));
            HandScore::new(Category::HighCard, kickers)
        }
    }
}

/// Evaluate the best five-card hand from 5 to 7 distinct cards, trying
/// every five-card subset (21 for seven cards) and keeping the maximum.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{evaluate_best, Category};
///
/// let cards = parse_cards("Kh Jd 5c 10s 10d As Ad").unwrap();
/// let score = evaluate_best(&cards).unwrap();
/// assert_eq!(score.category, Category::TwoPair);
/// assert_eq!(score.to_string(), "Two Pair, Aces and Tens");
/// ```
pub fn evaluate_best(cards: &[Card]) -> Result<HandScore, EvalError> {
    let n = cards.len();
    if n < 5 {
        return Err(EvalError::TooFewCards(n));
    }
    if n > 7 {
        return Err(EvalError::TooManyCards(n));
    }
    for (i, c) in cards.iter().enumerate() {
        if cards[i + 1..].contains(c) {
            return Err(EvalError::DuplicateCard(*c));
        }
    }

    let mut best: Option<HandScore> = None;
    for i in 0..n - 4 {
        for j in i + 1..n - 3 {
            for k in j + 1..n - 2 {
                for l in k + 1..n - 1 {
                    for m in l + 1..n {
                        let five = [cards[i], cards[j], cards[k], cards[l], cards[m]];
                        let score = evaluate_five(&five);
                        match &best {
                            Some(b) if *b >= score => {}
                            _ => best = Some(score),
                        }
                    }
                }
            }
        }
    }
    best.ok_or(EvalError::TooFewCards(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> HandScore {
        let cards = parse_cards(s).expect("valid cards");
        let arr: [Card; 5] = cards.try_into().expect("five cards");
        evaluate_five(&arr)
    }

    #[test]
    fn royal_flush_is_its_own_top_category() {
        let e = five("As Ks Qs Js 10s");
        assert_eq!(e.category, Category::RoyalFlush);
        assert_eq!(e.category.value(), 10);
        assert!(e > five("9s Ks Qs Js 10s"));
    }

    #[test]
    fn straight_flush_beats_quads_and_reports_high_card() {
        let e = five("9h 8h 7h 6h 5h");
        assert_eq!(e.category, Category::StraightFlush);
        assert_eq!(e.kickers[0], Rank::Nine);
        assert!(e > five("Kc Kd Kh Ks 2s"));
    }

    #[test]
    fn quads_kickers_are_quad_then_best_single() {
        let e = five("Kc Kd Kh Ks 9s");
        assert_eq!(e.category, Category::FourOfAKind);
        assert_eq!(e.kickers, vec![Rank::King, Rank::Nine]);
    }

    #[test]
    fn full_house_kickers_are_triple_then_pair() {
        let e = five("10c 10d 10h 2s 2h");
        assert_eq!(e.category, Category::FullHouse);
        assert_eq!(e.kickers, vec![Rank::Ten, Rank::Two]);
        assert!(e < five("10s 10d 10h 3s 3h"));
    }

    #[test]
    fn flush_ranks_descending() {
        let e = five("Ah 9h 7h 3h 2h");
        assert_eq!(e.category, Category::Flush);
        assert_eq!(e.kickers, vec![Rank::Ace, Rank::Nine, Rank::Seven, Rank::Three, Rank::Two]);
    }

    #[test]
    fn straight_flush_outranks_plain_flush_of_same_cards_plus_one() {
        // A hand that is both a flush and a straight must score as a
        // straight flush, never as a flush.
        let e = five("6c 5c 4c 3c 2c");
        assert_eq!(e.category, Category::StraightFlush);
    }

    #[test]
    fn wheel_is_a_five_high_straight() {
        let e = five("Ac 2d 3h 4s 5c");
        assert_eq!(e.category, Category::Straight);
        assert_eq!(
            e.kickers,
            vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
        );
        assert!(e < five("2d 3h 4s 5c 6c"), "wheel loses to the six-high straight");
        assert!(e > five("Qc Qd Qh 9s 2c"), "wheel beats three of a kind");
    }

    #[test]
    fn trips_two_pair_pair_and_high_card_kickers() {
        let e = five("Qc Qd Qh 9s 2c");
        assert_eq!(e.category, Category::ThreeOfAKind);
        assert_eq!(e.kickers, vec![Rank::Queen, Rank::Nine, Rank::Two]);

        let e = five("Jc Jd 9c 9h As");
        assert_eq!(e.category, Category::TwoPair);
        assert_eq!(e.kickers, vec![Rank::Jack, Rank::Nine, Rank::Ace]);

        let e = five("Ah Ad 10s 9c 2d");
        assert_eq!(e.category, Category::OnePair);
        assert_eq!(e.kickers, vec![Rank::Ace, Rank::Ten, Rank::Nine, Rank::Two]);

        let e = five("Ah Kd 7s 5c 2d");
        assert_eq!(e.category, Category::HighCard);
        assert_eq!(e.kickers, vec![Rank::Ace, Rank::King, Rank::Seven, Rank::Five, Rank::Two]);
    }

    #[test]
    fn evaluate_best_rejects_bad_input() {
        let four = parse_cards("Ah Kd 7s 5c").unwrap();
        assert_eq!(evaluate_best(&four), Err(EvalError::TooFewCards(4)));

        let eight = parse_cards("Ah Kd 7s 5c 2d 3d 4d 6d").unwrap();
        assert_eq!(evaluate_best(&eight), Err(EvalError::TooManyCards(8)));

        let dup = parse_cards("Ah Kd 7s 5c 2d Ah").unwrap();
        assert!(matches!(evaluate_best(&dup), Err(EvalError::DuplicateCard(_))));
    }

    #[test]
    fn evaluate_best_finds_hands_that_span_the_whole_input() {
        // Flush hides across 7 cards.
        let cards = parse_cards("Ah 9h 2c 7h Kd 3h Jh").unwrap();
        let score = evaluate_best(&cards).unwrap();
        assert_eq!(score.category, Category::Flush);
        assert_eq!(score.kickers[0], Rank::Ace);

        // Five cards evaluate directly as one subset.
        let cards = parse_cards("Ah Ad 10s 9c 2d").unwrap();
        assert_eq!(evaluate_best(&cards).unwrap().category, Category::OnePair);
    }

    #[test]
    fn descriptions_read_naturally() {
        assert_eq!(five("As Ks Qs Js 10s").to_string(), "a Royal Flush");
        assert_eq!(five("10c 10d 10h 2s 2h").to_string(), "a Full House, Tens over Twos");
        assert_eq!(five("Ah Ad 10s 9c 2d").to_string(), "a Pair of Aces");
        assert_eq!(five("Ah Kd 7s 5c 2d").to_string(), "Ace High");
    }
}

use holdem_rs::cards::{parse_cards, Card, Rank};
use holdem_rs::evaluator::{evaluate_best, Category, HandScore};
use holdem_rs::pot::PotManager;

fn best(hole: &str, board: &str) -> HandScore {
    let mut cards: Vec<Card> = parse_cards(board).expect("valid board");
    cards.extend(parse_cards(hole).expect("valid hole cards"));
    evaluate_best(&cards).expect("evaluable hand")
}

/// Three players share a double-paired board; everyone makes aces and tens
/// and only the kicker differs.
#[test]
fn kicker_decides_a_shared_two_pair_board() {
    let board = "5c 10s 10d As Ad";
    let a = best("9h 5s", board);
    let b = best("Kh Jd", board);
    let c = best("9c 3c", board);

    assert_eq!(a.category, Category::TwoPair);
    assert_eq!(a.kickers, vec![Rank::Ace, Rank::Ten, Rank::Nine]);

    assert_eq!(b.category, Category::TwoPair);
    assert_eq!(b.kickers, vec![Rank::Ace, Rank::Ten, Rank::King]);

    assert_eq!(c.category, Category::TwoPair);
    assert_eq!(c.kickers, vec![Rank::Ace, Rank::Ten, Rank::Nine]);

    assert!(b > a, "the king kicker wins outright");
    assert_eq!(a, c, "identical kickers tie exactly");
    assert_eq!(b.to_string(), "Two Pair, Aces and Tens");
}

#[test]
fn the_shared_two_pair_pot_goes_to_the_king_kicker() {
    let board = "5c 10s 10d As Ad";
    let scores = vec![
        Some(best("9h 5s", board)),
        Some(best("Kh Jd", board)),
        Some(best("9c 3c", board)),
    ];

    let mut pm = PotManager::new(3);
    for seat in 0..3 {
        pm.record(seat, 100, false);
    }
    let awards = pm.settle(&scores, 1);
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].winners, vec![1]);
    assert_eq!(awards[0].payouts, vec![(1, 300)]);
}

#[test]
fn exact_ties_split_the_pot_between_both_hands() {
    let board = "5c 10s 10d As Ad";
    let scores = vec![
        Some(best("9h 5s", board)),
        None,
        Some(best("9c 3c", board)),
    ];

    let mut pm = PotManager::new(3);
    for seat in 0..3 {
        pm.record(seat, 100, false);
    }
    pm.mark_folded(1);
    let awards = pm.settle(&scores, 1);
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].winners, vec![2, 0]);
    assert_eq!(awards[0].payouts, vec![(2, 150), (0, 150)]);
}

#[test]
fn board_plays_when_neither_hole_card_helps() {
    let board = "As Ks Qs Js 10s";
    let a = best("2c 3d", board);
    let b = best("9h 8h", board);
    assert_eq!(a.category, Category::RoyalFlush);
    assert_eq!(a, b, "a board royal flush ties everyone");
}

#[test]
fn straight_on_the_board_loses_to_a_higher_straight_in_hand() {
    let board = "9c 8d 7h 6s 5c";
    let played_board = best("2c 2d", board);
    let ten_high = best("10c 2h", board);
    assert_eq!(played_board.category, Category::Straight);
    assert_eq!(ten_high.category, Category::Straight);
    assert_eq!(ten_high.kickers[0], Rank::Ten);
    assert!(ten_high > played_board);
}

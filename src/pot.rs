use crate::evaluator::HandScore;

/// One pot: an amount, the contribution cap that closed it (None while
/// uncapped), and the seats still contesting it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Pot {
    pub amount: u64,
    pub cap: Option<u64>,
    pub eligible: Vec<usize>,
}

/// Outcome of settling one pot: who won, with what score, and the exact
/// per-seat payouts (splits included).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct PotAward {
    pub amount: u64,
    pub winners: Vec<usize>,
    pub score: Option<HandScore>,
    pub payouts: Vec<(usize, u64)>,
}

/// Tracks every chip moved from the players into the pot structure during a
/// hand, and derives the main-pot/side-pot breakdown from it.
///
/// A seat that goes all-in fixes its hand total as a cap level; each pair of
/// consecutive cap levels bounds one pot layer, and a layer is contested
/// exactly by the non-folded seats that funded it to its cap. The first
/// layer is the main pot; later layers are the side pots in the order the
/// all-ins created them. Because the layers partition the contribution
/// ledger, the sum of all pot amounts always equals the sum of all
/// contributions.
#[derive(Debug, Clone)]
pub struct PotManager {
    contributed: Vec<u64>,
    folded: Vec<bool>,
    caps: Vec<u64>,
}

impl PotManager {
    pub fn new(seats: usize) -> Self {
        Self { contributed: vec![0; seats], folded: vec![false; seats], caps: Vec::new() }
    }

    /// Forget the hand: all contributions, folds, and caps.
    pub fn reset(&mut self) {
        self.contributed.fill(0);
        self.folded.fill(false);
        self.caps.clear();
    }

    pub fn seats(&self) -> usize {
        self.contributed.len()
    }

    /// Record `amount` chips contributed by `seat`. When the contribution
    /// exhausted the seat's stack (`all_in`), the seat's hand total becomes
    /// a side-pot cap.
    pub fn record(&mut self, seat: usize, amount: u64, all_in: bool) {
        self.contributed[seat] += amount;
        if all_in {
            self.caps.push(self.contributed[seat]);
        }
    }

    /// Exclude `seat` from every pot it would otherwise contest. Its chips
    /// stay in.
    pub fn mark_folded(&mut self, seat: usize) {
        self.folded[seat] = true;
    }

    /// Sum of all chips contributed this hand.
    pub fn total(&self) -> u64 {
        self.contributed.iter().sum()
    }

    pub fn contributed_by(&self, seat: usize) -> u64 {
        self.contributed[seat]
    }

    /// The current main-pot/side-pot breakdown, main pot first.
    pub fn pots(&self) -> Vec<Pot> {
        let top = self.contributed.iter().copied().max().unwrap_or(0);
        if top == 0 {
            return Vec::new();
        }

        let mut levels: Vec<u64> = self.caps.iter().copied().filter(|&c| c > 0).collect();
        levels.push(top);
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut prev = 0u64;
        for level in levels {
            let amount: u64 = self
                .contributed
                .iter()
                .map(|&c| c.min(level).saturating_sub(c.min(prev)))
                .sum();
            let eligible: Vec<usize> = self
                .contributed
                .iter()
                .enumerate()
                .filter(|&(s, &c)| !self.folded[s] && c >= level)
                .map(|(s, _)| s)
                .collect();
            let cap = if self.caps.contains(&level) { Some(level) } else { None };
            prev = level;
            if amount == 0 {
                continue;
            }
            if eligible.is_empty() {
                // Every contributor at this level folded; the layer falls
                // back into the pot below it.
                if let Some(last) = pots.last_mut() {
                    last.amount += amount;
                    continue;
                }
            }
            pots.push(Pot { amount, cap, eligible });
        }
        pots
    }

    /// Settle every pot against the given showdown scores (indexed by
    /// seat; `None` for seats without a live hand). Each pot goes to its
    /// best eligible score; exact ties split evenly, and remainder chips go
    /// one apiece to the tied winners in seating order starting from
    /// `odd_chip_start` (the first seat clockwise of the button).
    pub fn settle(&self, scores: &[Option<HandScore>], odd_chip_start: usize) -> Vec<PotAward> {
        let n = self.seats();
        let seat_order = |&s: &usize| (s + n - odd_chip_start % n) % n;
        let mut awards = Vec::new();

        for pot in self.pots() {
            let mut best: Option<&HandScore> = None;
            let mut winners: Vec<usize> = Vec::new();
            for &s in &pot.eligible {
                let Some(score) = scores.get(s).and_then(|x| x.as_ref()) else {
                    continue;
                };
                match best {
                    Some(b) if score < b => {}
                    Some(b) if score == b => winners.push(s),
                    _ => {
                        best = Some(score);
                        winners.clear();
                        winners.push(s);
                    }
                }
            }
            if winners.is_empty() {
                continue;
            }
            winners.sort_by_key(seat_order);

            let per = pot.amount / winners.len() as u64;
            let mut rem = pot.amount % winners.len() as u64;
            let payouts: Vec<(usize, u64)> = winners
                .iter()
                .map(|&s| {
                    let extra = if rem > 0 {
                        rem -= 1;
                        1
                    } else {
                        0
                    };
                    (s, per + extra)
                })
                .collect();
            awards.push(PotAward {
                amount: pot.amount,
                winners,
                score: best.cloned(),
                payouts,
            });
        }
        awards
    }

    /// Pay everything to the lone surviving seat, no score comparison.
    pub fn award_all(&self, seat: usize) -> PotAward {
        let amount = self.total();
        PotAward { amount, winners: vec![seat], score: None, payouts: vec![(seat, amount)] }
    }
}

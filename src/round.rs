use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_best, EvalError, HandScore};
use crate::player::{Player, PlayerStatus};
use crate::pot::{Pot, PotAward, PotManager};
use rand::Rng;

/// Hand lifecycle states. The deal states and `Showdown` are transient:
/// the controller performs the deal or settlement and moves straight on,
/// so between calls the table sits in a betting state or in `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    BlindsAndAntes,
    PreflopBetting,
    FlopDeal,
    FlopBetting,
    TurnDeal,
    TurnBetting,
    RiverDeal,
    RiverBetting,
    Showdown,
    Settled,
}

impl Phase {
    pub const fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::PreflopBetting | Phase::FlopBetting | Phase::TurnBetting | Phase::RiverBetting
        )
    }
}

/// One betting decision. `Bet` carries the player's new total bet for the
/// street and covers both opening bets and raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet(u64),
    AllIn,
}

/// Table stakes. All blind and ante amounts live here; nothing is
/// hard-coded in the hand flow.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { small_blind: 10, big_blind: 20, ante: 0 }
    }
}

/// Faults in the hand machinery itself (as opposed to rejected player
/// actions). `Deck` here means a sequencing bug: a hand never needs more
/// than 52 cards.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("deck fault: {0}")]
    Deck(#[from] DeckError),
    #[error("evaluation fault: {0}")]
    Eval(#[from] EvalError),
    #[error("need at least two seats with chips to start a hand")]
    NotEnoughPlayers,
    #[error("cannot start a hand while one is in progress")]
    HandInProgress,
}

/// Why an action was rejected (turn order does not advance on rejection),
/// or a [`RoundError`] the accepted action ran into while advancing the
/// hand.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no betting in progress (phase {0:?})")]
    NotBettingPhase(Phase),
    #[error("seat {got} acted out of turn; seat {expected} is to act")]
    OutOfTurn { expected: usize, got: usize },
    #[error("seat {0} cannot act in this hand")]
    PlayerCannotAct(usize),
    #[error("cannot check facing a bet of {outstanding}")]
    CheckFacingBet { outstanding: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("bet of {got} is below the minimum of {min}")]
    BetBelowMinimum { min: u64, got: u64 },
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// What an accepted action did: chips moved, the pot it built, and the
/// phase the table is in afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ActionOutcome {
    pub seat: usize,
    pub chips_paid: u64,
    pub all_in: bool,
    pub pot_total: u64,
    pub phase: Phase,
}

/// Runs one hand at a time for a fixed ring of seats: blinds and antes,
/// hole cards, four betting streets with community reveals, showdown, and
/// settlement. Owns the deck, the players, and the pot ledger; everything
/// external goes through [`submit_action`](RoundController::submit_action)
/// and the query methods.
#[derive(Debug)]
pub struct RoundController {
    config: TableConfig,
    deck: Deck,
    players: Vec<Player>,
    community: Vec<Card>,
    pots: PotManager,
    phase: Phase,
    /// Rotating button; the small and big blinds are the next two seats.
    button: usize,
    sb_seat: usize,
    bb_seat: usize,
    current_highest_bet: u64,
    to_act: usize,
    /// Which active seats have acted since the street began or the bet was
    /// last raised.
    acted: Vec<bool>,
    scores: Vec<Option<HandScore>>,
    results: Vec<PotAward>,
}

impl RoundController {
    pub fn new(config: TableConfig, num_players: usize, starting_stack: u64) -> Self {
        Self::with_stacks(config, &vec![starting_stack; num_players])
    }

    /// Build a table with a specific stack per seat.
    pub fn with_stacks(config: TableConfig, stacks: &[u64]) -> Self {
        let num_players = stacks.len();
        let players = stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| Player::new(format!("P{}", i + 1), chips))
            .collect();
        Self {
            config,
            deck: Deck::new(),
            players,
            community: Vec::new(),
            pots: PotManager::new(num_players),
            phase: Phase::Settled,
            button: num_players.saturating_sub(1),
            sb_seat: 0,
            bb_seat: 0,
            current_highest_bet: 0,
            to_act: 0,
            acted: vec![false; num_players],
            scores: vec![None; num_players],
            results: Vec::new(),
        }
    }

    // --- queries ---------------------------------------------------------

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn small_blind_seat(&self) -> usize {
        self.sb_seat
    }

    pub fn big_blind_seat(&self) -> usize {
        self.bb_seat
    }

    /// Community cards revealed so far.
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// Total chips in the pot structure for the hand in progress; zero once
    /// the hand settles.
    pub fn pot_total(&self) -> u64 {
        self.pots.total()
    }

    /// Live main-pot/side-pot breakdown with eligible seats.
    pub fn pots(&self) -> Vec<Pot> {
        self.pots.pots()
    }

    pub fn current_highest_bet(&self) -> u64 {
        self.current_highest_bet
    }

    /// The seat whose action is awaited, when betting is in progress.
    pub fn seat_to_act(&self) -> Option<usize> {
        self.phase.is_betting().then_some(self.to_act)
    }

    /// Chips `seat` would need to pay to call right now.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.current_highest_bet.saturating_sub(self.players[seat].current_bet)
    }

    /// Smallest legal `Bet` target: twice the current highest bet once a
    /// bet exists on the street, any positive amount before that.
    pub fn min_bet(&self) -> u64 {
        if self.current_highest_bet > 0 {
            self.current_highest_bet * 2
        } else {
            1
        }
    }

    /// Per-pot settlement of the last completed hand.
    pub fn showdown_results(&self) -> &[PotAward] {
        &self.results
    }

    /// Showdown scores by seat for the last completed hand; `None` for
    /// seats that folded or never saw a showdown.
    pub fn showdown_scores(&self) -> &[Option<HandScore>] {
        &self.scores
    }

    // --- hand lifecycle --------------------------------------------------

    /// Start a new hand with a caller-supplied RNG for the shuffle.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoundError> {
        self.ensure_can_start()?;
        self.deck.reset();
        self.deck.shuffle_with(rng);
        self.begin_hand()
    }

    /// Start a new hand with a seeded shuffle, for reproducible deals.
    pub fn start_hand_seeded(&mut self, seed: u64) -> Result<(), RoundError> {
        self.ensure_can_start()?;
        self.deck.reset();
        self.deck.shuffle_seeded(seed);
        self.begin_hand()
    }

    fn ensure_can_start(&self) -> Result<(), RoundError> {
        if self.phase != Phase::Settled {
            return Err(RoundError::HandInProgress);
        }
        if self.players.iter().filter(|p| p.chips > 0).count() < 2 {
            return Err(RoundError::NotEnoughPlayers);
        }
        Ok(())
    }

    fn begin_hand(&mut self) -> Result<(), RoundError> {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.community.clear();
        self.pots.reset();
        self.results.clear();
        self.scores = vec![None; self.players.len()];
        self.current_highest_bet = 0;
        self.acted.fill(false);

        self.phase = Phase::BlindsAndAntes;
        self.button = self.next_in_hand_after(self.button);
        self.post_antes();
        self.post_blinds();
        self.deal_hole_cards()?;

        self.phase = Phase::PreflopBetting;
        self.to_act = self.next_active_after(self.bb_seat).unwrap_or(self.bb_seat);
        if self.street_complete() {
            self.advance_street()?;
        }
        Ok(())
    }

    fn post_antes(&mut self) {
        if self.config.ante == 0 {
            return;
        }
        for seat in 0..self.players.len() {
            if self.players[seat].has_folded() {
                continue;
            }
            let paid = self.players[seat].pay(self.config.ante);
            // Antes are dead money: they seed the pot but are not street bets.
            self.players[seat].current_bet -= paid;
            if paid > 0 {
                let all_in = self.players[seat].status == PlayerStatus::AllIn;
                self.pots.record(seat, paid, all_in);
            }
        }
    }

    fn post_blinds(&mut self) {
        self.sb_seat = self.next_in_hand_after(self.button);
        self.bb_seat = self.next_in_hand_after(self.sb_seat);
        let sb_paid = self.post_blind(self.sb_seat, self.config.small_blind);
        let bb_paid = self.post_blind(self.bb_seat, self.config.big_blind);
        // A short blind cannot create an obligation larger than it posted.
        self.current_highest_bet = sb_paid.max(bb_paid);
    }

    fn post_blind(&mut self, seat: usize, amount: u64) -> u64 {
        let paid = self.players[seat].pay(amount);
        if paid > 0 {
            let all_in = self.players[seat].status == PlayerStatus::AllIn;
            self.pots.record(seat, paid, all_in);
        }
        self.players[seat].current_bet
    }

    fn deal_hole_cards(&mut self) -> Result<(), DeckError> {
        for seat in 0..self.players.len() {
            if self.players[seat].has_folded() {
                continue;
            }
            let a = self.deck.deal()?;
            let b = self.deck.deal()?;
            self.players[seat].hole = Some([a, b]);
        }
        Ok(())
    }

    // --- betting ---------------------------------------------------------

    /// Apply one betting action for `seat`. Rejections leave the table
    /// untouched: the same seat stays on the clock and must resubmit.
    pub fn submit_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<ActionOutcome, ActionError> {
        if !self.phase.is_betting() {
            return Err(ActionError::NotBettingPhase(self.phase));
        }
        if seat != self.to_act {
            return Err(ActionError::OutOfTurn { expected: self.to_act, got: seat });
        }
        if !self.players[seat].is_active() {
            return Err(ActionError::PlayerCannotAct(seat));
        }

        let paid = match action {
            PlayerAction::Fold => return self.apply_fold(seat),
            PlayerAction::Check => {
                let outstanding = self.to_call(seat);
                if outstanding > 0 {
                    return Err(ActionError::CheckFacingBet { outstanding });
                }
                0
            }
            PlayerAction::Call => {
                let need = self.to_call(seat);
                if self.current_highest_bet == 0 || need == 0 {
                    return Err(ActionError::NothingToCall);
                }
                // A stack short of the call goes all-in for what remains.
                self.players[seat].pay(need)
            }
            PlayerAction::Bet(target) => {
                let already_in = self.players[seat].current_bet;
                let max_total = already_in + self.players[seat].chips;
                if target < max_total {
                    let min = self.min_bet();
                    if target < min {
                        return Err(ActionError::BetBelowMinimum { min, got: target });
                    }
                    self.players[seat].pay(target - already_in)
                } else {
                    // Target at or beyond the stack: an all-in, exempt from
                    // the minimum-raise rule.
                    self.players[seat].pay(u64::MAX)
                }
            }
            PlayerAction::AllIn => self.players[seat].pay(u64::MAX),
        };

        let all_in = self.players[seat].status == PlayerStatus::AllIn;
        if paid > 0 {
            self.pots.record(seat, paid, all_in);
        }
        if self.players[seat].current_bet > self.current_highest_bet {
            // The bet went up: everyone still active owes a response.
            self.current_highest_bet = self.players[seat].current_bet;
            self.acted.fill(false);
        }
        self.acted[seat] = true;
        let pot_total = self.pots.total();

        if self.street_complete() {
            self.advance_street()?;
        } else if let Some(next) = self.next_active_after(seat) {
            self.to_act = next;
        }

        Ok(ActionOutcome { seat, chips_paid: paid, all_in, pot_total, phase: self.phase })
    }

    fn apply_fold(&mut self, seat: usize) -> Result<ActionOutcome, ActionError> {
        self.players[seat].fold();
        self.pots.mark_folded(seat);
        self.acted[seat] = true;
        let pot_total = self.pots.total();

        let survivors: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.has_folded())
            .map(|(s, _)| s)
            .collect();
        if let [winner] = survivors[..] {
            // Uncontested: settle immediately, revealing nothing further.
            self.settle_uncontested(winner);
        } else if self.street_complete() {
            self.advance_street()?;
        } else if let Some(next) = self.next_active_after(seat) {
            self.to_act = next;
        }

        Ok(ActionOutcome {
            seat,
            chips_paid: 0,
            all_in: false,
            pot_total,
            phase: self.phase,
        })
    }

    /// A street is done when nobody owes a response: every active seat has
    /// acted since the last raise and matches the highest bet. With one or
    /// zero seats able to act, it is done as soon as nothing is owed.
    fn street_complete(&self) -> bool {
        let active: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(s, _)| s)
            .collect();
        match active[..] {
            [] => true,
            [only] => self.players[only].current_bet >= self.current_highest_bet,
            _ => active
                .iter()
                .all(|&s| self.acted[s] && self.players[s].current_bet == self.current_highest_bet),
        }
    }

    fn advance_street(&mut self) -> Result<(), RoundError> {
        match self.phase {
            Phase::PreflopBetting => {
                self.phase = Phase::FlopDeal;
                self.deal_community(3)?;
                self.begin_street(Phase::FlopBetting);
            }
            Phase::FlopBetting => {
                self.phase = Phase::TurnDeal;
                self.deal_community(1)?;
                self.begin_street(Phase::TurnBetting);
            }
            Phase::TurnBetting => {
                self.phase = Phase::RiverDeal;
                self.deal_community(1)?;
                self.begin_street(Phase::RiverBetting);
            }
            Phase::RiverBetting => {
                self.phase = Phase::Showdown;
                self.finish_showdown()?;
                return Ok(());
            }
            _ => return Ok(()),
        }
        // Nobody left who can bet: run the remaining streets out.
        if self.street_complete() {
            return self.advance_street();
        }
        Ok(())
    }

    fn begin_street(&mut self, phase: Phase) {
        for p in &mut self.players {
            p.current_bet = 0;
        }
        self.current_highest_bet = 0;
        self.acted.fill(false);
        self.phase = phase;
        // Postflop action starts at the first active seat in seating order.
        self.to_act = self.players.iter().position(|p| p.is_active()).unwrap_or(0);
    }

    fn deal_community(&mut self, count: usize) -> Result<(), DeckError> {
        // Burn one before each reveal.
        let _ = self.deck.deal()?;
        for _ in 0..count {
            let card = self.deck.deal()?;
            self.community.push(card);
        }
        Ok(())
    }

    // --- settlement ------------------------------------------------------

    fn finish_showdown(&mut self) -> Result<(), RoundError> {
        let mut scores: Vec<Option<HandScore>> = vec![None; self.players.len()];
        for (seat, p) in self.players.iter().enumerate() {
            if p.has_folded() {
                continue;
            }
            let Some(hole) = p.hole else { continue };
            let mut cards: Vec<Card> = Vec::with_capacity(7);
            cards.extend_from_slice(&self.community);
            cards.extend_from_slice(&hole);
            scores[seat] = Some(evaluate_best(&cards).map_err(RoundError::Eval)?);
        }

        let awards = self.pots.settle(&scores, self.sb_seat);
        for award in &awards {
            for &(seat, amount) in &award.payouts {
                self.players[seat].chips += amount;
            }
        }
        self.scores = scores;
        self.results = awards;
        self.pots.reset();
        self.phase = Phase::Settled;
        Ok(())
    }

    fn settle_uncontested(&mut self, winner: usize) {
        let award = self.pots.award_all(winner);
        for &(seat, amount) in &award.payouts {
            self.players[seat].chips += amount;
        }
        self.results = vec![award];
        self.pots.reset();
        self.phase = Phase::Settled;
    }

    // --- seat walking ----------------------------------------------------

    /// Next seat still in the hand (not folded, not sitting out).
    fn next_in_hand_after(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|k| (seat + k) % n)
            .find(|&s| !self.players[s].has_folded())
            .unwrap_or(seat)
    }

    /// Next seat that can still act (active, not all-in).
    fn next_active_after(&self, seat: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|k| (seat + k) % n).find(|&s| self.players[s].is_active())
    }
}

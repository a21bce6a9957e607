//! Seams to the world outside the core: something that decides actions
//! (human frontend, scripted test, bot) and something that renders state.
//! The core depends on neither for correctness; both see the table only
//! through [`TableSnapshot`].

use crate::cards::Card;
use crate::player::PlayerStatus;
use crate::pot::Pot;
use crate::round::{ActionError, Phase, PlayerAction, RoundController, RoundError};
use std::collections::VecDeque;

/// Public view of one seat: everything an opponent is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SeatView {
    pub name: String,
    pub chips: u64,
    pub current_bet: u64,
    pub status: PlayerStatus,
}

/// Table state handed to action sources and presentation sinks.
///
/// `viewer_hole` carries the acting seat's own hole cards when the snapshot
/// accompanies a turn request; broadcast snapshots leave it `None`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TableSnapshot {
    pub phase: Phase,
    pub community: Vec<Card>,
    pub pot_total: u64,
    pub pots: Vec<Pot>,
    pub current_highest_bet: u64,
    pub seat_to_act: Option<usize>,
    pub seats: Vec<SeatView>,
    pub viewer_hole: Option<[Card; 2]>,
}

impl TableSnapshot {
    pub fn capture(table: &RoundController, viewer: Option<usize>) -> Self {
        Self {
            phase: table.phase(),
            community: table.community().to_vec(),
            pot_total: table.pot_total(),
            pots: table.pots(),
            current_highest_bet: table.current_highest_bet(),
            seat_to_act: table.seat_to_act(),
            seats: table
                .players()
                .iter()
                .map(|p| SeatView {
                    name: p.name().to_string(),
                    chips: p.chips(),
                    current_bet: p.current_bet(),
                    status: p.status(),
                })
                .collect(),
            viewer_hole: viewer.and_then(|s| table.players()[s].hole()),
        }
    }

    /// Chips the viewing seat owes to call.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.current_highest_bet.saturating_sub(self.seats[seat].current_bet)
    }
}

/// Supplies the next action for a seat, synchronously, when the controller
/// reaches that seat's turn. `rejected` carries the reason the previous
/// submission bounced; the turn does not move on until a legal action
/// arrives, so implementations must eventually answer with one. Timeouts
/// are the caller's concern: translate one into a fold or all-in here.
pub trait PlayerActionSource {
    fn next_action(
        &mut self,
        seat: usize,
        view: &TableSnapshot,
        rejected: Option<&ActionError>,
    ) -> PlayerAction;
}

/// Receives state snapshots to render. Purely an observer.
pub trait PresentationSink {
    fn on_snapshot(&mut self, snapshot: &TableSnapshot);
}

/// Sink that ignores everything; the core runs headless against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_snapshot(&mut self, _snapshot: &TableSnapshot) {}
}

/// A fixed queue of actions for scripted tests, consumed in turn order
/// across all seats. An exhausted script folds.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<PlayerAction>,
}

impl ScriptedSource {
    pub fn new<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = PlayerAction>,
    {
        Self { queue: actions.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PlayerActionSource for ScriptedSource {
    fn next_action(
        &mut self,
        _seat: usize,
        _view: &TableSnapshot,
        _rejected: Option<&ActionError>,
    ) -> PlayerAction {
        self.queue.pop_front().unwrap_or(PlayerAction::Fold)
    }
}

/// Checks when nothing is owed, calls otherwise. Handy for walking hands
/// to showdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallingSource;

impl PlayerActionSource for CallingSource {
    fn next_action(
        &mut self,
        seat: usize,
        view: &TableSnapshot,
        _rejected: Option<&ActionError>,
    ) -> PlayerAction {
        if view.to_call(seat) > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        }
    }
}

/// Pump one betting phase: request actions from `source` until the phase
/// changes, resubmitting on rejection without advancing the turn. Every
/// accepted action is broadcast to `sink`. Returns the phase the table
/// lands in.
pub fn drive_betting<S>(
    table: &mut RoundController,
    source: &mut S,
    sink: &mut dyn PresentationSink,
) -> Result<Phase, RoundError>
where
    S: PlayerActionSource + ?Sized,
{
    let entry = table.phase();
    let mut rejected: Option<ActionError> = None;
    while table.phase() == entry {
        let Some(seat) = table.seat_to_act() else { break };
        let view = TableSnapshot::capture(table, Some(seat));
        let action = source.next_action(seat, &view, rejected.as_ref());
        match table.submit_action(seat, action) {
            Ok(_) => {
                rejected = None;
                sink.on_snapshot(&TableSnapshot::capture(table, None));
            }
            Err(ActionError::Round(fault)) => return Err(fault),
            Err(reason) => rejected = Some(reason),
        }
    }
    Ok(table.phase())
}

/// Pump an already-started hand through every remaining betting phase
/// until it settles.
pub fn drive_hand<S>(
    table: &mut RoundController,
    source: &mut S,
    sink: &mut dyn PresentationSink,
) -> Result<(), RoundError>
where
    S: PlayerActionSource + ?Sized,
{
    while table.phase().is_betting() {
        drive_betting(table, source, sink)?;
    }
    Ok(())
}

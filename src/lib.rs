//! holdem-rs: a headless Texas Hold'em rules engine
//!
//! Goals:
//! - Correct hand evaluation with explicit, comparable scores
//! - Exact pot accounting under all-ins (main pot + side pots)
//! - A synchronous, single-table betting state machine
//! - No panics for invalid input; use `Result` for recoverable errors
//! - Zero side effects beyond in-memory state, so everything tests headless
//!
//! Rendering, input devices, and resource loading live outside the crate;
//! plug them in through [`sources::PlayerActionSource`] and
//! [`sources::PresentationSink`].
//!
//! ## Quick start: score a hand
//! ```
//! use holdem_rs::cards::parse_cards;
//! use holdem_rs::evaluator::{evaluate_best, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh 10h 2c 2d").unwrap();
//! let score = evaluate_best(&cards).unwrap();
//! assert_eq!(score.category, Category::RoyalFlush);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_rs::round::{Phase, RoundController, TableConfig};
//! use holdem_rs::sources::{drive_hand, CallingSource, NullSink};
//!
//! let mut table = RoundController::new(TableConfig::default(), 3, 1000);
//! table.start_hand_seeded(7).unwrap();
//! drive_hand(&mut table, &mut CallingSource, &mut NullSink).unwrap();
//! assert_eq!(table.phase(), Phase::Settled);
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod player;
pub mod pot;
pub mod round;
pub mod sources;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#![forbid(unsafe_code)]

//! Domain model for the course's practice widgets.
//!
//! Every quiz, puzzle and memory game on the course pages shares one state
//! shape: a sequence of items walked through one at a time, a score, and a
//! per-item answer state. [`PracticeSession`] implements that once, generic
//! over the item type and the scoring rule. [`GameSession`] adds the optional
//! countdown, [`MatchingPairs`] the memory-game variant, and [`demos`] holds
//! the precomputed numeric sequences stepped through by the visualizers.

pub mod demos;
pub mod error;
pub mod input;
pub mod lp2d;
pub mod model;
pub mod pairs;
pub mod session;
pub mod shuffle;
pub mod time;
pub mod timer;
pub mod transport;

pub use error::SessionError;
pub use pairs::{MatchingPairs, PairsError, SelectOutcome};
pub use session::{Advance, PracticeSession, SessionSnapshot};
pub use shuffle::Shuffler;
pub use time::Clock;
pub use timer::{Countdown, GameSession, TickOutcome};

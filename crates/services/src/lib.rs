#![forbid(unsafe_code)]

//! Orchestration around the practice-session domain: logging and summaries,
//! view-models for a presentation layer, the timers that drive countdowns,
//! flip-backs and playback, and the catalog of course widgets.

pub mod catalog;
pub mod error;
pub mod scheduling;
pub mod sessions;

pub use practice_core::Clock;

pub use catalog::Widget;
pub use error::{CatalogError, PracticeError};
pub use scheduling::{DeferredTask, SchedulingError, TickControl, Ticker};
pub use sessions::{
    ItemBody, LiveMemoryGame, LivePlayback, LiveSession, MemoryBoardView, PlaybackView,
    PracticeLoop, QuizLoop, SessionProgress, SessionView,
};

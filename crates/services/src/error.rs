//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::SessionError;
use practice_core::lp2d::LpError;
use practice_core::model::{ItemError, SessionSummaryError, SettingsError};
use practice_core::pairs::PairsError;
use practice_core::transport::TransportError;

use crate::catalog::Widget;
use crate::scheduling::SchedulingError;

/// Errors emitted by the widget catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown widget {0:?}")]
    UnknownWidget(String),
    #[error("widget {0} is not a quiz")]
    NotAQuiz(Widget),
    #[error("widget {0} is not a memory game")]
    NotAMemoryGame(Widget),
    #[error("widget {0} is not a step-through demo")]
    NotADemo(Widget),
    #[error("demo {0} has no steps")]
    EmptyDemo(Widget),
}

/// Errors emitted by practice sessions and the live handles around them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pairs(#[from] PairsError),
    #[error(transparent)]
    Lp(#[from] LpError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

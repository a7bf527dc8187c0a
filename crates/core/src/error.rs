use thiserror::Error;

/// Rejected session transitions.
///
/// A presentation layer is expected to disable the triggering control
/// instead of surfacing these; the session state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no items available for session")]
    Empty,

    #[error("session has not been started")]
    NotStarted,

    #[error("session already completed")]
    Completed,

    #[error("item {requested} is not the current item ({current})")]
    NotCurrentItem { requested: usize, current: usize },

    #[error("current item has already been answered")]
    AlreadyAnswered,

    #[error("current item has not been answered yet")]
    NotAnswered,

    #[error("answer must be revealed before advancing")]
    NotRevealed,
}

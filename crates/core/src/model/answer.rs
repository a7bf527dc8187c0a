use serde::{Deserialize, Serialize};

//
// ─── ANSWER STATE ──────────────────────────────────────────────────────────────
//

/// Progress marker for the current item.
///
/// Moves `Unanswered → Answered → Revealed` and never backwards, except when
/// the whole session is reset or the cursor moves to the next item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerState<R> {
    Unanswered,
    Answered { selection: R, is_correct: bool },
    Revealed { selection: R, is_correct: bool },
}

impl<R> AnswerState<R> {
    #[must_use]
    pub fn stage(&self) -> AnswerStage {
        match self {
            AnswerState::Unanswered => AnswerStage::Unanswered,
            AnswerState::Answered { .. } => AnswerStage::Answered,
            AnswerState::Revealed { .. } => AnswerStage::Revealed,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<&R> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Answered { selection, .. } | AnswerState::Revealed { selection, .. } => {
                Some(selection)
            }
        }
    }

    /// `None` until the item has been answered.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Answered { is_correct, .. } | AnswerState::Revealed { is_correct, .. } => {
                Some(*is_correct)
            }
        }
    }

    /// Consumes an `Answered` state into `Revealed`; other states come back unchanged.
    #[must_use]
    pub(crate) fn into_revealed(self) -> Self {
        match self {
            AnswerState::Answered {
                selection,
                is_correct,
            } => AnswerState::Revealed {
                selection,
                is_correct,
            },
            other => other,
        }
    }
}

impl<R> Default for AnswerState<R> {
    fn default() -> Self {
        AnswerState::Unanswered
    }
}

/// Payload-free view of [`AnswerState`] for view-models and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerStage {
    Unanswered,
    Answered,
    Revealed,
}

//
// ─── ITEM OUTCOME ──────────────────────────────────────────────────────────────
//

/// Final result recorded for each item once it has been left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOutcome {
    /// Not reached yet.
    Pending,
    /// Answered correctly; points were awarded.
    Correct,
    Incorrect,
    /// Passed without an answer (free-advance games or timer expiry).
    Skipped,
}

impl ItemOutcome {
    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, ItemOutcome::Correct | ItemOutcome::Incorrect)
    }
}

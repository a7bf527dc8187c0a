use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ItemOutcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds max score ({max})")]
    ScoreExceedsMax { score: u32, max: u32 },

    #[error("too many items for a single session: {len}")]
    TooManyItems { len: usize },
}

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// The user advanced past the last item.
    Completed,
    /// The countdown reached zero first.
    TimedOut,
}

/// Aggregate result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    reason: FinishReason,
    total_items: u32,
    correct: u32,
    incorrect: u32,
    skipped: u32,
    score: u32,
    max_score: u32,
}

impl SessionSummary {
    /// Build a summary from the per-item outcomes of a session.
    ///
    /// Items still `Pending` count as skipped.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`,
    /// `ScoreExceedsMax` if the score is out of range, and `TooManyItems` if the
    /// item count cannot fit in `u32`.
    pub fn from_outcomes(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        reason: FinishReason,
        outcomes: &[ItemOutcome],
        score: u32,
        max_score: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if score > max_score {
            return Err(SessionSummaryError::ScoreExceedsMax {
                score,
                max: max_score,
            });
        }
        let total_items = u32::try_from(outcomes.len())
            .map_err(|_| SessionSummaryError::TooManyItems { len: outcomes.len() })?;

        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut skipped = 0_u32;
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Correct => correct = correct.saturating_add(1),
                ItemOutcome::Incorrect => incorrect = incorrect.saturating_add(1),
                ItemOutcome::Skipped | ItemOutcome::Pending => skipped = skipped.saturating_add(1),
            }
        }

        Ok(Self {
            started_at,
            completed_at,
            reason,
            total_items,
            correct,
            incorrect,
            skipped,
            score,
            max_score,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn reason(&self) -> FinishReason {
        self.reason
    }

    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Wall-clock seconds between start and finish.
    #[must_use]
    pub fn duration_secs(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }
}

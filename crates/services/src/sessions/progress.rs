use practice_core::model::{ItemOutcome, PracticeItem, ScoringRule};
use practice_core::PracticeSession;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn of<I: PracticeItem, S: ScoringRule>(session: &PracticeSession<I, S>) -> Self {
        let outcomes = session.outcomes();
        let answered = outcomes.iter().filter(|o| o.is_answered()).count();
        let correct = outcomes
            .iter()
            .filter(|o| **o == ItemOutcome::Correct)
            .count();
        Self {
            total: session.len(),
            answered,
            correct,
            remaining: session.len() - session.current_index(),
            is_complete: session.is_complete(),
        }
    }
}

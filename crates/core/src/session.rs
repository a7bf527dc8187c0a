use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SessionError;
use crate::model::{
    AdvanceGate, AnswerStage, AnswerState, FinishReason, ItemOutcome, ItemPoints, PracticeItem,
    ScoringRule,
};
use crate::shuffle::Shuffler;

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Comparable view of the controller's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub score: u32,
    pub stage: AnswerStage,
    pub completed: bool,
}

impl SessionSnapshot {
    /// The state every session starts in and returns to on reset.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            current_index: 0,
            score: 0,
            stage: AnswerStage::Unanswered,
            completed: false,
        }
    }
}

/// Result of a successful `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the item at this index.
    Next(usize),
    /// Moved past the last item.
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Question/card sequence with scoring, one item at a time.
///
/// Items are fixed for the lifetime of the session (a reset may reorder them
/// when a [`Shuffler`] is attached). The controller guarantees:
/// - `0 <= score <= max_score()` at every point,
/// - each item is scored at most once,
/// - `is_complete()` holds exactly when `current_index() == len()`.
pub struct PracticeSession<I: PracticeItem, S: ScoringRule = ItemPoints> {
    items: Vec<I>,
    outcomes: Vec<ItemOutcome>,
    current: usize,
    score: u32,
    answer: AnswerState<I::Response>,
    finish: Option<FinishReason>,
    gate: AdvanceGate,
    scoring: S,
    shuffler: Option<Shuffler>,
}

impl<I: PracticeItem> PracticeSession<I, ItemPoints> {
    /// Create a session over `items`, scored by each item's own point value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no items are provided.
    pub fn new(items: Vec<I>) -> Result<Self, SessionError> {
        if items.is_empty() {
            return Err(SessionError::Empty);
        }
        let outcomes = vec![ItemOutcome::Pending; items.len()];
        Ok(Self {
            items,
            outcomes,
            current: 0,
            score: 0,
            answer: AnswerState::Unanswered,
            finish: None,
            gate: AdvanceGate::default(),
            scoring: ItemPoints,
            shuffler: None,
        })
    }
}

impl<I: PracticeItem, S: ScoringRule> PracticeSession<I, S> {
    /// Swap the scoring rule. Intended before the first answer; the score is
    /// cleared so it stays consistent with the new rule.
    #[must_use]
    pub fn with_scoring<T: ScoringRule>(self, scoring: T) -> PracticeSession<I, T> {
        let mut session = PracticeSession {
            items: self.items,
            outcomes: self.outcomes,
            current: self.current,
            score: 0,
            answer: self.answer,
            finish: self.finish,
            gate: self.gate,
            scoring,
            shuffler: self.shuffler,
        };
        session.reset();
        session
    }

    #[must_use]
    pub fn with_gate(mut self, gate: AdvanceGate) -> Self {
        self.gate = gate;
        self
    }

    /// Attach a random source; items are shuffled now and on every reset.
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = Some(shuffler);
        self.reset();
        self
    }

    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; empty sessions are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&I> {
        self.items.get(self.current)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Upper bound on the score: every item answered correctly.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.items
            .iter()
            .map(|item| self.scoring.max_award(item.points()))
            .fold(0_u32, u32::saturating_add)
    }

    #[must_use]
    pub fn answer_state(&self) -> &AnswerState<I::Response> {
        &self.answer
    }

    #[must_use]
    pub fn outcomes(&self) -> &[ItemOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn gate(&self) -> AdvanceGate {
        self.gate
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current == self.items.len()
    }

    /// `None` while the session is still in progress.
    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish
    }

    /// Explanation of the current item, available once revealed.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        match self.answer {
            AnswerState::Revealed { .. } => self.current_item().and_then(|item| item.explanation()),
            _ => None,
        }
    }

    #[must_use]
    pub fn can_select(&self) -> bool {
        !self.is_complete() && self.answer.stage() == AnswerStage::Unanswered
    }

    #[must_use]
    pub fn can_reveal(&self) -> bool {
        !self.is_complete() && self.answer.stage() == AnswerStage::Answered
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_complete() && self.check_gate().is_ok()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current,
            score: self.score,
            stage: self.answer.stage(),
            completed: self.is_complete(),
        }
    }

    /// Commit an answer for the current item.
    ///
    /// Returns whether the answer was correct; a correct answer adds the
    /// item's points to the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last item,
    /// `SessionError::NotCurrentItem` if `item_index` is not the current item, and
    /// `SessionError::AlreadyAnswered` if the item already has an answer.
    pub fn select_answer(
        &mut self,
        item_index: usize,
        response: I::Response,
    ) -> Result<bool, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if item_index != self.current {
            return Err(SessionError::NotCurrentItem {
                requested: item_index,
                current: self.current,
            });
        }
        if self.answer.stage() != AnswerStage::Unanswered {
            return Err(SessionError::AlreadyAnswered);
        }

        let item = &self.items[self.current];
        let is_correct = item.is_correct(&response);
        if self.outcomes[self.current] == ItemOutcome::Pending {
            let award = self.scoring.award(item.points(), is_correct);
            self.score = self.score.saturating_add(award);
            self.outcomes[self.current] = if is_correct {
                ItemOutcome::Correct
            } else {
                ItemOutcome::Incorrect
            };
        }
        self.answer = AnswerState::Answered {
            selection: response,
            is_correct,
        };
        Ok(is_correct)
    }

    /// Show the explanation for the answered item.
    ///
    /// Revealing twice is a no-op that returns the same explanation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last item and
    /// `SessionError::NotAnswered` before an answer exists.
    pub fn reveal(&mut self) -> Result<Option<&str>, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        match self.answer.stage() {
            AnswerStage::Unanswered => return Err(SessionError::NotAnswered),
            AnswerStage::Answered => {
                self.answer = std::mem::take(&mut self.answer).into_revealed();
            }
            AnswerStage::Revealed => {}
        }
        Ok(self.explanation())
    }

    /// Move to the next item, or past the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last item, otherwise
    /// `NotAnswered`/`NotRevealed` when the advance gate is closed.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        self.check_gate()?;

        if self.outcomes[self.current] == ItemOutcome::Pending {
            self.outcomes[self.current] = ItemOutcome::Skipped;
        }
        self.current += 1;
        self.answer = AnswerState::Unanswered;

        if self.is_complete() {
            self.finish = Some(FinishReason::Completed);
            Ok(Advance::Completed)
        } else {
            Ok(Advance::Next(self.current))
        }
    }

    /// Jump to the terminal state without passing through the remaining
    /// items; used when a countdown expires.
    ///
    /// Returns `false` if the session was already complete.
    pub fn finish_early(&mut self, reason: FinishReason) -> bool {
        if self.is_complete() {
            return false;
        }
        for outcome in &mut self.outcomes[self.current..] {
            if *outcome == ItemOutcome::Pending {
                *outcome = ItemOutcome::Skipped;
            }
        }
        self.current = self.items.len();
        self.answer = AnswerState::Unanswered;
        self.finish = Some(reason);
        true
    }

    /// Return to the initial snapshot, reshuffling when a shuffler is attached.
    pub fn reset(&mut self) {
        if let Some(shuffler) = self.shuffler.as_mut() {
            shuffler.shuffle(&mut self.items);
        }
        self.outcomes.iter_mut().for_each(|o| *o = ItemOutcome::Pending);
        self.current = 0;
        self.score = 0;
        self.answer = AnswerState::Unanswered;
        self.finish = None;
    }

    fn check_gate(&self) -> Result<(), SessionError> {
        let stage = self.answer.stage();
        match self.gate {
            AdvanceGate::Free => Ok(()),
            AdvanceGate::RequireAnswer if stage >= AnswerStage::Answered => Ok(()),
            AdvanceGate::RequireReveal if stage == AnswerStage::Revealed => Ok(()),
            _ if stage == AnswerStage::Unanswered => Err(SessionError::NotAnswered),
            _ => Err(SessionError::NotRevealed),
        }
    }
}

impl<I: PracticeItem, S: ScoringRule> fmt::Debug for PracticeSession<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("items_len", &self.items.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("stage", &self.answer.stage())
            .field("finish", &self.finish)
            .field("gate", &self.gate)
            .field("shuffler", &self.shuffler)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceQuestion, FlatPoints, ItemId};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn question(id: u64, correct: usize) -> ChoiceQuestion {
        ChoiceQuestion::new(ItemId::new(id), &format!("Q{id}"), ["a", "b", "c"], correct)
            .unwrap()
            .with_explanation(format!("because {id}"))
    }

    fn three_item_session() -> PracticeSession<ChoiceQuestion> {
        PracticeSession::new(vec![question(1, 0), question(2, 1), question(3, 2)]).unwrap()
    }

    fn answer_and_move(session: &mut PracticeSession<ChoiceQuestion>, choice: usize) -> Advance {
        let idx = session.current_index();
        session.select_answer(idx, choice).unwrap();
        session.reveal().unwrap();
        session.advance().unwrap()
    }

    #[test]
    fn empty_session_returns_error() {
        let err = PracticeSession::<ChoiceQuestion>::new(Vec::new()).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn three_item_quiz_scores_two_of_three() {
        let mut session = three_item_session();

        assert_eq!(answer_and_move(&mut session, 0), Advance::Next(1));
        assert_eq!(answer_and_move(&mut session, 0), Advance::Next(2));
        assert_eq!(answer_and_move(&mut session, 2), Advance::Completed);

        assert_eq!(session.score(), 2);
        assert!(session.is_complete());
        assert_eq!(session.current_index(), 3);
        assert_eq!(session.finish_reason(), Some(FinishReason::Completed));
        assert_eq!(
            session.outcomes(),
            &[ItemOutcome::Correct, ItemOutcome::Incorrect, ItemOutcome::Correct]
        );
    }

    #[test]
    fn completion_only_after_advancing_from_last_item() {
        let mut session = three_item_session();
        answer_and_move(&mut session, 0);
        answer_and_move(&mut session, 1);
        assert!(!session.is_complete());
        assert_eq!(session.current_index(), 2);

        session.select_answer(2, 2).unwrap();
        session.reveal().unwrap();
        assert!(!session.is_complete());
        session.advance().unwrap();
        assert!(session.is_complete());
    }

    #[test]
    fn selecting_twice_is_rejected_and_scores_once() {
        let mut session = three_item_session();
        assert!(session.select_answer(0, 0).unwrap());
        let before = session.snapshot();

        assert_eq!(session.select_answer(0, 0), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn selecting_other_item_is_rejected() {
        let mut session = three_item_session();
        let err = session.select_answer(2, 2).unwrap_err();
        assert_eq!(err, SessionError::NotCurrentItem { requested: 2, current: 0 });
        assert_eq!(session.snapshot(), SessionSnapshot::initial());
    }

    #[test]
    fn reveal_requires_answer() {
        let mut session = three_item_session();
        assert!(!session.can_reveal());
        assert_eq!(session.reveal(), Err(SessionError::NotAnswered));
        assert_eq!(session.explanation(), None);

        session.select_answer(0, 1).unwrap();
        assert!(session.can_reveal());
        assert_eq!(session.reveal().unwrap(), Some("because 1"));
        assert_eq!(session.answer_state().stage(), AnswerStage::Revealed);
        assert_eq!(session.answer_state().selection(), Some(&1));
    }

    #[test]
    fn advance_requires_reveal_by_default() {
        let mut session = three_item_session();
        assert_eq!(session.advance(), Err(SessionError::NotAnswered));
        session.select_answer(0, 0).unwrap();
        assert!(!session.can_advance());
        assert_eq!(session.advance(), Err(SessionError::NotRevealed));
        session.reveal().unwrap();
        assert!(session.can_advance());
        assert_eq!(session.advance(), Ok(Advance::Next(1)));
        assert_eq!(session.answer_state().stage(), AnswerStage::Unanswered);
    }

    #[test]
    fn require_answer_gate_skips_reveal() {
        let mut session = three_item_session().with_gate(AdvanceGate::RequireAnswer);
        session.select_answer(0, 0).unwrap();
        assert_eq!(session.advance(), Ok(Advance::Next(1)));
    }

    #[test]
    fn free_gate_marks_unanswered_items_skipped() {
        let mut session = three_item_session().with_gate(AdvanceGate::Free);
        session.advance().unwrap();
        session.select_answer(1, 1).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();

        assert!(session.is_complete());
        assert_eq!(session.score(), 1);
        assert_eq!(
            session.outcomes(),
            &[ItemOutcome::Skipped, ItemOutcome::Correct, ItemOutcome::Skipped]
        );
    }

    #[test]
    fn actions_after_completion_are_rejected() {
        let mut session = three_item_session().with_gate(AdvanceGate::Free);
        for _ in 0..3 {
            session.advance().unwrap();
        }
        assert_eq!(session.advance(), Err(SessionError::Completed));
        assert_eq!(session.select_answer(3, 0), Err(SessionError::Completed));
        assert_eq!(session.reveal(), Err(SessionError::Completed));
        assert!(!session.can_select());
    }

    #[test]
    fn reset_restores_initial_snapshot() {
        let mut session = three_item_session();
        answer_and_move(&mut session, 0);
        session.select_answer(1, 1).unwrap();

        session.reset();
        assert_eq!(session.snapshot(), SessionSnapshot::initial());
        assert_eq!(session.finish_reason(), None);
        assert!(session.outcomes().iter().all(|o| *o == ItemOutcome::Pending));

        answer_and_move(&mut session, 0);
        answer_and_move(&mut session, 1);
        answer_and_move(&mut session, 2);
        session.reset();
        assert_eq!(session.snapshot(), SessionSnapshot::initial());
    }

    #[test]
    fn seeded_shuffle_is_reproducible_across_resets() {
        let items: Vec<_> = (1..=6).map(|id| question(id, 0)).collect();
        let order = |s: &PracticeSession<ChoiceQuestion>| {
            s.items().iter().map(|q| q.id().value()).collect::<Vec<_>>()
        };

        let mut a = PracticeSession::new(items.clone())
            .unwrap()
            .with_shuffler(Shuffler::seeded(3));
        let mut b = PracticeSession::new(items)
            .unwrap()
            .with_shuffler(Shuffler::seeded(3));
        assert_eq!(order(&a), order(&b));

        a.reset();
        b.reset();
        assert_eq!(order(&a), order(&b));
        let mut sorted = order(&a);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn flat_points_scale_max_score() {
        let mut session = three_item_session().with_scoring(FlatPoints(10));
        assert_eq!(session.max_score(), 30);
        session.select_answer(0, 0).unwrap();
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn finish_early_triggers_once() {
        let mut session = three_item_session();
        session.select_answer(0, 0).unwrap();

        assert!(session.finish_early(FinishReason::TimedOut));
        assert!(session.is_complete());
        assert_eq!(session.current_index(), 3);
        assert_eq!(session.score(), 1);
        assert_eq!(session.finish_reason(), Some(FinishReason::TimedOut));
        assert_eq!(
            session.outcomes(),
            &[ItemOutcome::Correct, ItemOutcome::Skipped, ItemOutcome::Skipped]
        );

        assert!(!session.finish_early(FinishReason::TimedOut));
    }

    #[test]
    fn score_stays_within_bounds_under_random_actions() {
        let mut rng = StdRng::seed_from_u64(99);
        for gate in [AdvanceGate::RequireReveal, AdvanceGate::RequireAnswer, AdvanceGate::Free] {
            let mut session = three_item_session().with_gate(gate);
            let mut last_score = 0;
            for _ in 0..500 {
                match rng.random_range(0..5) {
                    0 => {
                        let idx = rng.random_range(0..4);
                        let _ = session.select_answer(idx, rng.random_range(0..3));
                    }
                    1 => {
                        let _ = session.reveal();
                    }
                    2 => {
                        let _ = session.advance();
                    }
                    3 if rng.random_bool(0.05) => {
                        session.reset();
                        last_score = 0;
                    }
                    _ => {}
                }
                assert!(session.score() <= session.max_score());
                assert!(session.score() >= last_score);
                assert!(session.current_index() <= session.len());
                assert_eq!(session.is_complete(), session.current_index() == session.len());
                last_score = session.score();
            }
        }
    }
}

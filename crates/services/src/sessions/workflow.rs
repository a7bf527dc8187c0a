use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use practice_core::model::{
    FlatPoints, ItemPoints, PracticeItem, QuizItem, ScoringRule, SessionSettings, SessionSummary,
};
use practice_core::{Advance, Clock, GameSession, PracticeSession, Shuffler, TickOutcome};

use super::progress::SessionProgress;
use crate::error::PracticeError;

/// Practice loop used by every catalog quiz.
pub type QuizLoop = PracticeLoop<QuizItem, FlatPoints>;

/// Drives one widget's session: timestamps, logging and the final summary.
///
/// The loop owns the time source (`Clock`) so the domain types stay pure.
/// It does **not** own timers; see [`super::LiveSession`] for the ticking
/// handle.
#[derive(Debug)]
pub struct PracticeLoop<I: PracticeItem, S: ScoringRule = ItemPoints> {
    title: String,
    clock: Clock,
    game: GameSession<I, S>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl<I: PracticeItem> PracticeLoop<I, FlatPoints> {
    /// Build a loop configured by `settings`: flat points per item, advance
    /// gate, optional shuffle (using `shuffler`) and optional time limit.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` if `items` is empty.
    pub fn from_settings(
        title: impl Into<String>,
        clock: Clock,
        items: Vec<I>,
        settings: &SessionSettings,
        shuffler: Shuffler,
    ) -> Result<Self, PracticeError> {
        let mut session = PracticeSession::new(items)?
            .with_scoring(FlatPoints(settings.points_per_item()))
            .with_gate(settings.gate());
        if settings.shuffle() {
            session = session.with_shuffler(shuffler);
        }
        let game = GameSession::new(session, settings.time_limit_secs());
        Ok(Self::new(title, clock, game))
    }
}

impl<I: PracticeItem, S: ScoringRule> PracticeLoop<I, S> {
    #[must_use]
    pub fn new(title: impl Into<String>, clock: Clock, game: GameSession<I, S>) -> Self {
        Self {
            title: title.into(),
            clock,
            game,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn game(&self) -> &GameSession<I, S> {
        &self.game
    }

    #[must_use]
    pub fn session(&self) -> &PracticeSession<I, S> {
        self.game.session()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.game.is_started()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.game.session().is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::of(self.game.session())
    }

    /// Start or restart the session.
    pub fn start(&mut self) {
        self.game.start();
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        info!(
            widget = %self.title,
            items = self.game.session().len(),
            time_limit = ?self.game.time_remaining(),
            "practice session started"
        );
    }

    /// Answer the item at `item_index`.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` when the answer is not allowed in the
    /// current state; the session is left unchanged.
    pub fn select(&mut self, item_index: usize, response: I::Response) -> Result<bool, PracticeError> {
        match self.game.select_answer(item_index, response) {
            Ok(is_correct) => {
                debug!(
                    widget = %self.title,
                    item = item_index,
                    is_correct,
                    score = self.game.session().score(),
                    "answer selected"
                );
                Ok(is_correct)
            }
            Err(err) => {
                warn!(widget = %self.title, item = item_index, error = %err, "answer rejected");
                Err(err.into())
            }
        }
    }

    /// Reveal the current item and return its explanation.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` before an answer exists.
    pub fn reveal(&mut self) -> Result<Option<String>, PracticeError> {
        let title = &self.title;
        match self.game.reveal() {
            Ok(explanation) => {
                debug!(widget = %title, "answer revealed");
                Ok(explanation.map(str::to_owned))
            }
            Err(err) => {
                warn!(widget = %title, error = %err, "reveal rejected");
                Err(err.into())
            }
        }
    }

    /// Move past the current item.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` while the advance gate is closed or
    /// after completion.
    pub fn advance(&mut self) -> Result<Advance, PracticeError> {
        match self.game.advance() {
            Ok(Advance::Completed) => {
                self.mark_completed();
                info!(
                    widget = %self.title,
                    score = self.game.session().score(),
                    max_score = self.game.session().max_score(),
                    "practice session completed"
                );
                Ok(Advance::Completed)
            }
            Ok(next) => {
                debug!(widget = %self.title, ?next, "advanced");
                Ok(next)
            }
            Err(err) => {
                warn!(widget = %self.title, error = %err, "advance rejected");
                Err(err.into())
            }
        }
    }

    /// One countdown second.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.game.tick();
        if outcome == TickOutcome::Expired {
            self.mark_completed();
            info!(
                widget = %self.title,
                score = self.game.session().score(),
                "time ran out"
            );
        }
        outcome
    }

    /// Back to the pre-start state.
    pub fn reset(&mut self) {
        self.game.reset();
        self.started_at = None;
        self.completed_at = None;
        debug!(widget = %self.title, "practice session reset");
    }

    /// Summary of a finished session; `None` while it is still running.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Summary` if the recorded timestamps or score
    /// are inconsistent.
    pub fn summary(&self) -> Result<Option<SessionSummary>, PracticeError> {
        let session = self.game.session();
        let (Some(started_at), Some(completed_at), Some(reason)) =
            (self.started_at, self.completed_at, session.finish_reason())
        else {
            return Ok(None);
        };
        let summary = SessionSummary::from_outcomes(
            started_at,
            completed_at,
            reason,
            session.outcomes(),
            session.score(),
            session.max_score(),
        )?;
        Ok(Some(summary))
    }

    fn mark_completed(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
        }
    }
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use practice_core::model::{CardId, SessionSettings};
use practice_core::{MatchingPairs, SelectOutcome};

use super::lock;
use super::view::MemoryBoardView;
use crate::error::PracticeError;
use crate::scheduling::DeferredTask;

/// Memory game with its mismatch flip-back scheduled on the runtime.
///
/// At most one flip-back is pending at a time; `reset()` and dropping the
/// handle cancel it. A flip-back that still fires after a reset carries a
/// stale token and is ignored by the board.
#[derive(Debug)]
pub struct LiveMemoryGame {
    title: String,
    board: Arc<Mutex<MatchingPairs>>,
    flip_back_delay: Duration,
    flip_back: Option<DeferredTask>,
}

impl LiveMemoryGame {
    #[must_use]
    pub fn new(title: impl Into<String>, board: MatchingPairs, flip_back_delay: Duration) -> Self {
        Self {
            title: title.into(),
            board: Arc::new(Mutex::new(board)),
            flip_back_delay,
            flip_back: None,
        }
    }

    #[must_use]
    pub fn from_settings(
        title: impl Into<String>,
        board: MatchingPairs,
        settings: &SessionSettings,
    ) -> Self {
        let delay = Duration::from_millis(u64::from(settings.flip_back_delay_ms()));
        Self::new(title, board, delay)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn flip_back_delay(&self) -> Duration {
        self.flip_back_delay
    }

    #[must_use]
    pub fn view(&self) -> MemoryBoardView {
        MemoryBoardView::of(&lock(&self.board))
    }

    /// Read access to the board.
    pub fn with<R>(&self, read: impl FnOnce(&MatchingPairs) -> R) -> R {
        read(&lock(&self.board))
    }

    /// Select a card by id.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Scheduling` if a mismatch occurs outside a
    /// tokio runtime; the two cards then stay face up.
    pub fn select(&mut self, id: CardId) -> Result<SelectOutcome, PracticeError> {
        let outcome = lock(&self.board).select(id);
        self.after_select(outcome)
    }

    /// Select a card by board position.
    ///
    /// # Errors
    ///
    /// Same as [`LiveMemoryGame::select`].
    pub fn select_at(&mut self, position: usize) -> Result<SelectOutcome, PracticeError> {
        let outcome = lock(&self.board).select_at(position);
        self.after_select(outcome)
    }

    /// Hide every card, reshuffle, and drop any pending flip-back.
    pub fn reset(&mut self) {
        self.flip_back = None;
        lock(&self.board).reset();
        debug!(widget = %self.title, "memory game reset");
    }

    fn after_select(&mut self, outcome: SelectOutcome) -> Result<SelectOutcome, PracticeError> {
        match outcome {
            SelectOutcome::Ignored(reason) => {
                debug!(widget = %self.title, ?reason, "card selection ignored");
            }
            SelectOutcome::Flipped(id) => {
                debug!(widget = %self.title, card = %id, "card flipped");
            }
            SelectOutcome::Matched { first, second } => {
                let board = lock(&self.board);
                debug!(widget = %self.title, %first, %second, score = board.score(), "pair matched");
                if board.is_complete() {
                    info!(widget = %self.title, moves = board.moves(), "memory game completed");
                }
            }
            SelectOutcome::Mismatched { token } => {
                let board = Arc::clone(&self.board);
                let title = self.title.clone();
                let task = DeferredTask::schedule(self.flip_back_delay, move || {
                    if lock(&board).flip_back(token) {
                        debug!(widget = %title, "mismatched pair flipped back");
                    }
                })?;
                self.flip_back = Some(task);
            }
        }
        Ok(outcome)
    }
}

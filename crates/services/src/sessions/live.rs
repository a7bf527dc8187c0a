use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use practice_core::model::{ItemPoints, PracticeItem, ScoringRule, SessionSummary};
use practice_core::{Advance, TickOutcome};

use super::lock;
use super::view::{DescribeItem, SessionView};
use super::workflow::PracticeLoop;
use crate::error::PracticeError;
use crate::scheduling::{TickControl, Ticker};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The loop plus the number of the run its ticker belongs to.
///
/// Every `start()` and `reset()` bumps `run`; a tick carrying an older run
/// number is dropped, even if its task was aborted too late to stop it.
#[derive(Debug)]
struct Shared<I, S>
where
    I: PracticeItem,
    S: ScoringRule,
{
    practice: PracticeLoop<I, S>,
    run: u64,
}

fn tick_run<I, S>(shared: &Mutex<Shared<I, S>>, run: u64) -> TickControl
where
    I: PracticeItem,
    S: ScoringRule,
{
    let mut shared = lock(shared);
    if shared.run != run {
        debug!(run, current = shared.run, "stale countdown tick ignored");
        return TickControl::Stop;
    }
    match shared.practice.tick() {
        TickOutcome::Running { .. } => TickControl::Continue,
        TickOutcome::Expired | TickOutcome::Idle => TickControl::Stop,
    }
}

/// A practice loop whose countdown is driven by a background ticker.
///
/// The ticker only runs for timed sessions, between `start()` and
/// completion, expiry or `reset()`. Dropping the handle stops it.
#[derive(Debug)]
pub struct LiveSession<I, S = ItemPoints>
where
    I: PracticeItem,
    S: ScoringRule,
{
    shared: Arc<Mutex<Shared<I, S>>>,
    ticker: Option<Ticker>,
}

impl<I, S> LiveSession<I, S>
where
    I: PracticeItem + Send + 'static,
    I::Response: Send,
    S: ScoringRule + Send + 'static,
{
    #[must_use]
    pub fn new(practice: PracticeLoop<I, S>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared { practice, run: 0 })),
            ticker: None,
        }
    }

    /// Read access to the underlying loop.
    pub fn with<R>(&self, read: impl FnOnce(&PracticeLoop<I, S>) -> R) -> R {
        read(&lock(&self.shared).practice)
    }

    /// Whether the countdown ticker is currently scheduled.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|ticker| !ticker.is_finished())
    }

    /// Start or restart the session; timed sessions begin counting down.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Scheduling` if a timed session is started
    /// outside a tokio runtime. The session itself is started regardless.
    pub fn start(&mut self) -> Result<(), PracticeError> {
        self.ticker = None;
        let (timed, run) = {
            let mut shared = lock(&self.shared);
            shared.run = shared.run.wrapping_add(1);
            shared.practice.start();
            (shared.practice.game().is_timed(), shared.run)
        };
        if timed {
            let shared = Arc::clone(&self.shared);
            let ticker = Ticker::spawn(TICK_PERIOD, move || tick_run(&shared, run))?;
            self.ticker = Some(ticker);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`PracticeLoop::select`].
    pub fn select(&mut self, item_index: usize, response: I::Response) -> Result<bool, PracticeError> {
        lock(&self.shared).practice.select(item_index, response)
    }

    /// # Errors
    ///
    /// See [`PracticeLoop::reveal`].
    pub fn reveal(&mut self) -> Result<Option<String>, PracticeError> {
        lock(&self.shared).practice.reveal()
    }

    /// # Errors
    ///
    /// See [`PracticeLoop::advance`].
    pub fn advance(&mut self) -> Result<Advance, PracticeError> {
        let advance = lock(&self.shared).practice.advance()?;
        if advance == Advance::Completed && self.ticker.take().is_some() {
            debug!("countdown ticker stopped on completion");
        }
        Ok(advance)
    }

    /// Stop the countdown and return to the pre-start state.
    pub fn reset(&mut self) {
        self.ticker = None;
        let mut shared = lock(&self.shared);
        shared.run = shared.run.wrapping_add(1);
        shared.practice.reset();
    }

    /// # Errors
    ///
    /// See [`PracticeLoop::summary`].
    pub fn summary(&self) -> Result<Option<SessionSummary>, PracticeError> {
        lock(&self.shared).practice.summary()
    }
}

impl<I, S> LiveSession<I, S>
where
    I: PracticeItem + DescribeItem + Send + 'static,
    I::Response: Send,
    S: ScoringRule + Send + 'static,
{
    #[must_use]
    pub fn view(&self) -> SessionView {
        lock(&self.shared).practice.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Widget};
    use practice_core::Shuffler;
    use practice_core::model::{FlatPoints, QuizItem};
    use practice_core::time::fixed_clock;

    fn timed() -> LiveSession<QuizItem, FlatPoints> {
        let widget = Widget::SuperBrainGame;
        let practice = catalog::start_quiz(
            widget,
            &widget.default_settings().unwrap(),
            fixed_clock(),
            Shuffler::seeded(2),
        )
        .unwrap();
        LiveSession::new(practice)
    }

    fn remaining(live: &LiveSession<QuizItem, FlatPoints>) -> Option<u32> {
        live.with(|p| p.game().time_remaining())
    }

    #[tokio::test(start_paused = true)]
    async fn tick_from_a_previous_run_is_ignored_after_restart() {
        let mut live = timed();
        live.start().unwrap();
        let old_run = lock(&live.shared).run;

        live.start().unwrap();
        let full = remaining(&live);
        assert_eq!(tick_run(&live.shared, old_run), TickControl::Stop);
        assert_eq!(remaining(&live), full);

        let current = lock(&live.shared).run;
        assert_eq!(tick_run(&live.shared, current), TickControl::Continue);
        assert_eq!(remaining(&live), full.map(|secs| secs - 1));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_retires_the_running_ticker() {
        let mut live = timed();
        live.start().unwrap();
        let run = lock(&live.shared).run;
        live.reset();
        assert!(!live.is_ticking());
        assert_eq!(tick_run(&live.shared, run), TickControl::Stop);
    }
}

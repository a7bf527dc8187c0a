use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::model::{FinishReason, ItemPoints, PracticeItem, ScoringRule};
use crate::session::{Advance, PracticeSession};

//
// ─── COUNTDOWN ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownState {
    /// Not started, or reset.
    Idle,
    Running,
    Paused,
    /// Reached zero; stays here until restarted.
    Expired,
    /// Halted before reaching zero (session completed).
    Stopped,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is counting down.
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick. Reported once per run.
    Expired,
}

/// Whole-second countdown advanced by external ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration_secs: u32,
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining: duration_secs,
            state: CountdownState::Idle,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// (Re)start from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.duration_secs;
        self.state = CountdownState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    pub fn stop(&mut self) {
        if matches!(self.state, CountdownState::Running | CountdownState::Paused) {
            self.state = CountdownState::Stopped;
        }
    }

    /// Back to idle with the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration_secs;
        self.state = CountdownState::Idle;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining,
            }
        }
    }
}

//
// ─── GAME SESSION ──────────────────────────────────────────────────────────────
//

/// A practice session plus the optional countdown of timed games.
///
/// Answers are only accepted once the game has been started. When the
/// countdown reaches zero the session is forced into its terminal state,
/// whatever the current answer state is.
#[derive(Debug)]
pub struct GameSession<I: PracticeItem, S: ScoringRule = ItemPoints> {
    session: PracticeSession<I, S>,
    countdown: Option<Countdown>,
    started: bool,
}

impl<I: PracticeItem, S: ScoringRule> GameSession<I, S> {
    #[must_use]
    pub fn new(session: PracticeSession<I, S>, time_limit_secs: Option<u32>) -> Self {
        Self {
            session,
            countdown: time_limit_secs.map(Countdown::new),
            started: false,
        }
    }

    #[must_use]
    pub fn untimed(session: PracticeSession<I, S>) -> Self {
        Self::new(session, None)
    }

    #[must_use]
    pub fn session(&self) -> &PracticeSession<I, S> {
        &self.session
    }

    #[must_use]
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// `None` for untimed games.
    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.countdown.is_some()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Started and not yet complete.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.session.is_complete()
    }

    /// Start (or play again). A second start resets the session first.
    pub fn start(&mut self) {
        if self.started {
            self.session.reset();
        }
        self.started = true;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.start();
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start()`, otherwise whatever
    /// [`PracticeSession::select_answer`] returns.
    pub fn select_answer(
        &mut self,
        item_index: usize,
        response: I::Response,
    ) -> Result<bool, SessionError> {
        self.ensure_started()?;
        self.session.select_answer(item_index, response)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start()`, otherwise whatever
    /// [`PracticeSession::reveal`] returns.
    pub fn reveal(&mut self) -> Result<Option<&str>, SessionError> {
        self.ensure_started()?;
        self.session.reveal()
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start()`, otherwise whatever
    /// [`PracticeSession::advance`] returns.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.ensure_started()?;
        let advance = self.session.advance()?;
        if advance == Advance::Completed {
            if let Some(countdown) = self.countdown.as_mut() {
                countdown.stop();
            }
        }
        Ok(advance)
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `TickOutcome::Expired` exactly once per run, on the tick that
    /// forced the session terminal.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(countdown) = self.countdown.as_mut() else {
            return TickOutcome::Idle;
        };
        if !self.started || self.session.is_complete() {
            countdown.stop();
            return TickOutcome::Idle;
        }
        let outcome = countdown.tick();
        if outcome == TickOutcome::Expired && !self.session.finish_early(FinishReason::TimedOut) {
            return TickOutcome::Idle;
        }
        outcome
    }

    /// Back to the pre-start state with a full countdown.
    pub fn reset(&mut self) {
        self.session.reset();
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.reset();
        }
        self.started = false;
    }

    fn ensure_started(&self) -> Result<(), SessionError> {
        if self.started {
            Ok(())
        } else {
            Err(SessionError::NotStarted)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerStage, ChoiceQuestion, ItemId, ItemOutcome};

    fn game(limit: Option<u32>) -> GameSession<ChoiceQuestion> {
        let items = (1..=3)
            .map(|id| ChoiceQuestion::new(ItemId::new(id), "Q", ["a", "b"], 0).unwrap())
            .collect();
        GameSession::new(PracticeSession::new(items).unwrap(), limit)
    }

    #[test]
    fn countdown_expires_once() {
        let mut countdown = Countdown::new(2);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        countdown.start();
        assert_eq!(countdown.tick(), TickOutcome::Running { remaining: 1 });
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.state(), CountdownState::Expired);
    }

    #[test]
    fn paused_countdown_does_not_decrement() {
        let mut countdown = Countdown::new(5);
        countdown.start();
        countdown.pause();
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 5);
        countdown.resume();
        assert_eq!(countdown.tick(), TickOutcome::Running { remaining: 4 });
    }

    #[test]
    fn answers_rejected_before_start() {
        let mut game = game(Some(10));
        assert_eq!(game.select_answer(0, 0), Err(SessionError::NotStarted));
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.time_remaining(), Some(10));
    }

    #[test]
    fn expiry_forces_terminal_state_exactly_once() {
        let mut game = game(Some(5));
        game.start();
        game.select_answer(0, 0).unwrap();

        for expected in (1..5).rev() {
            assert_eq!(game.tick(), TickOutcome::Running { remaining: expected });
        }
        assert_eq!(game.tick(), TickOutcome::Expired);
        assert!(game.session().is_complete());
        assert_eq!(game.session().finish_reason(), Some(FinishReason::TimedOut));
        assert_eq!(game.session().score(), 1);
        assert_eq!(game.session().answer_state().stage(), AnswerStage::Unanswered);

        for _ in 0..3 {
            assert_eq!(game.tick(), TickOutcome::Idle);
        }
        assert_eq!(game.time_remaining(), Some(0));
        assert!(!game.is_running());
    }

    #[test]
    fn completing_before_expiry_stops_the_countdown() {
        let mut game = game(Some(30));
        game.start();
        for idx in 0..3 {
            game.select_answer(idx, 1).unwrap();
            game.reveal().unwrap();
            game.advance().unwrap();
        }
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.time_remaining(), Some(30));
        assert_eq!(game.session().finish_reason(), Some(FinishReason::Completed));
        assert_eq!(game.session().outcomes()[0], ItemOutcome::Incorrect);
    }

    #[test]
    fn restarting_resets_timer_and_session() {
        let mut game = game(Some(5));
        game.start();
        game.select_answer(0, 0).unwrap();
        game.tick();
        game.tick();

        game.start();
        assert_eq!(game.time_remaining(), Some(5));
        assert_eq!(game.session().score(), 0);
        assert!(game.is_running());
    }

    #[test]
    fn untimed_game_never_expires() {
        let mut game = game(None);
        game.start();
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.time_remaining(), None);
        assert!(!game.is_timed());
    }

    #[test]
    fn reset_returns_to_pre_start() {
        let mut game = game(Some(5));
        game.start();
        game.tick();
        game.reset();
        assert!(!game.is_started());
        assert_eq!(game.time_remaining(), Some(5));
        assert_eq!(game.countdown().unwrap().state(), CountdownState::Idle);
    }
}

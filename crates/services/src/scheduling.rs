//! Timers behind the countdown, the memory-game flip-back and demo playback.
//!
//! Both handles own a tokio task and abort it when dropped, so a widget that
//! is torn down never receives a late callback.

use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchedulingError {
    #[error("timers need a running tokio runtime")]
    NoRuntime,
}

fn current_runtime() -> Result<Handle, SchedulingError> {
    Handle::try_current().map_err(|_| SchedulingError::NoRuntime)
}

/// Single-shot callback run after a delay unless cancelled first.
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
}

impl DeferredTask {
    /// # Errors
    ///
    /// Returns `SchedulingError::NoRuntime` outside a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Result<Self, SchedulingError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = current_runtime()?.spawn(async move {
            time::sleep(delay).await;
            callback();
        });
        Ok(Self { handle })
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Fired or cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// What a ticker callback wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Repeating callback, first fired one period after spawning.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// # Errors
    ///
    /// Returns `SchedulingError::NoRuntime` outside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Result<Self, SchedulingError>
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let handle = current_runtime()?.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick() == TickControl::Stop {
                    break;
                }
            }
        });
        Ok(Self { handle })
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use practice_core::demos::Playback;

use super::lock;
use super::view::PlaybackView;
use crate::error::PracticeError;
use crate::scheduling::{TickControl, Ticker};

/// Play/Pause handle for a visualizer's precomputed steps.
#[derive(Debug)]
pub struct LivePlayback<T> {
    playback: Arc<Mutex<Playback<T>>>,
    period: Duration,
    ticker: Option<Ticker>,
}

impl<T: Send + 'static> LivePlayback<T> {
    #[must_use]
    pub fn new(playback: Playback<T>, period: Duration) -> Self {
        Self {
            playback: Arc::new(Mutex::new(playback)),
            period,
            ticker: None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        lock(&self.playback).is_playing()
    }

    /// # Errors
    ///
    /// Returns `PracticeError::Scheduling` outside a tokio runtime.
    pub fn play(&mut self) -> Result<(), PracticeError> {
        lock(&self.playback).play();
        let shared = Arc::clone(&self.playback);
        let ticker = Ticker::spawn(self.period, move || {
            let mut playback = lock(&shared);
            playback.tick();
            if playback.is_playing() {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        });
        match ticker {
            Ok(ticker) => {
                self.ticker = Some(ticker);
                Ok(())
            }
            Err(err) => {
                lock(&self.playback).pause();
                Err(err.into())
            }
        }
    }

    pub fn pause(&mut self) {
        self.ticker = None;
        lock(&self.playback).pause();
    }

    /// Returns the new playing state.
    ///
    /// # Errors
    ///
    /// See [`LivePlayback::play`].
    pub fn toggle(&mut self) -> Result<bool, PracticeError> {
        if self.is_playing() {
            self.pause();
            Ok(false)
        } else {
            self.play()?;
            Ok(true)
        }
    }

    pub fn step_forward(&mut self) -> bool {
        self.ticker = None;
        lock(&self.playback).step_forward()
    }

    pub fn step_back(&mut self) -> bool {
        self.ticker = None;
        lock(&self.playback).step_back()
    }

    pub fn reset(&mut self) {
        self.ticker = None;
        lock(&self.playback).reset();
    }
}

impl<T: Clone + Send + 'static> LivePlayback<T> {
    #[must_use]
    pub fn view(&self) -> PlaybackView<T> {
        PlaybackView::of(&lock(&self.playback))
    }
}

/// Index into a precomputed, non-empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCursor<T> {
    steps: Vec<T>,
    index: usize,
}

impl<T> StepCursor<T> {
    /// `None` for an empty sequence.
    #[must_use]
    pub fn new(steps: Vec<T>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self { steps, index: 0 })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> &T {
        &self.steps[self.index]
    }

    #[must_use]
    pub fn steps(&self) -> &[T] {
        &self.steps
    }

    /// Steps up to and including the current one.
    #[must_use]
    pub fn visited(&self) -> &[T] {
        &self.steps[..=self.index]
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    /// Returns false when already on the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns false when already on the first step.
    pub fn step_back(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

/// Play/pause over a [`StepCursor`]: each tick moves one step while playing.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback<T> {
    cursor: StepCursor<T>,
    playing: bool,
}

impl<T> Playback<T> {
    #[must_use]
    pub fn new(cursor: StepCursor<T>) -> Self {
        Self {
            cursor,
            playing: false,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &StepCursor<T> {
        &self.cursor
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Starts playing; from the last step, playback restarts at the beginning.
    pub fn play(&mut self) {
        if self.cursor.is_at_end() {
            self.cursor.rewind();
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    /// Manual stepping pauses playback.
    pub fn step_forward(&mut self) -> bool {
        self.playing = false;
        self.cursor.step_forward()
    }

    pub fn step_back(&mut self) -> bool {
        self.playing = false;
        self.cursor.step_back()
    }

    pub fn reset(&mut self) {
        self.playing = false;
        self.cursor.rewind();
    }

    /// Returns whether the cursor moved. Pauses itself on the last step.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let moved = self.cursor.step_forward();
        if self.cursor.is_at_end() {
            self.playing = false;
        }
        moved
    }
}

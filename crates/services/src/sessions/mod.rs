mod live;
mod memory;
mod playback;
mod progress;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use live::LiveSession;
pub use memory::LiveMemoryGame;
pub use playback::LivePlayback;
pub use progress::SessionProgress;
pub use view::{CardView, DescribeItem, ItemBody, MemoryBoardView, PlaybackView, SessionView};
pub use workflow::{PracticeLoop, QuizLoop};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared widget state; a panic in another holder does not invalidate it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

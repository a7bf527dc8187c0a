//! Precomputed numeric sequences behind the step-through visualizers.
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `descent`     | Gradient descent on `f(x, y) = x² + y²` |
//! | `convergence` | Synthetic error curves for convergence-rate comparisons |
//! | `cursor`      | Step index and play/pause over a precomputed sequence |

pub mod convergence;
pub mod cursor;
pub mod descent;

pub use convergence::{ConvergenceRate, convergence_curve};
pub use cursor::{Playback, StepCursor};
pub use descent::{DescentStep, GradientDescent};

use serde::{Deserialize, Serialize};

/// Fixed step size used by the course's descent widget.
pub const DEFAULT_STEP_SIZE: f64 = 0.1;
/// Fixed iteration count used by the course's descent widget.
pub const DEFAULT_ITERATIONS: usize = 20;
/// Starting point used by the course's descent widget.
pub const DEFAULT_START: (f64, f64) = (4.0, 3.0);

/// One iterate of the descent trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentStep {
    pub iteration: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub gradient_norm: f64,
}

/// Gradient descent on the bowl `f(x, y) = x² + y²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    pub start: (f64, f64),
    pub step_size: f64,
    pub iterations: usize,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            step_size: DEFAULT_STEP_SIZE,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl GradientDescent {
    #[must_use]
    pub fn objective(x: f64, y: f64) -> f64 {
        x * x + y * y
    }

    #[must_use]
    pub fn gradient(x: f64, y: f64) -> (f64, f64) {
        (2.0 * x, 2.0 * y)
    }

    /// The start point followed by `iterations` updates.
    #[must_use]
    pub fn trace(&self) -> Vec<DescentStep> {
        let (mut x, mut y) = self.start;
        let mut steps = Vec::with_capacity(self.iterations + 1);
        for iteration in 0..=self.iterations {
            let (gx, gy) = Self::gradient(x, y);
            steps.push(DescentStep {
                iteration,
                x,
                y,
                value: Self::objective(x, y),
                gradient_norm: gx.hypot(gy),
            });
            x -= self.step_size * gx;
            y -= self.step_size * gy;
        }
        steps
    }
}

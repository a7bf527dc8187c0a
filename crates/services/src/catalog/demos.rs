use std::time::Duration;

use serde::Serialize;

use practice_core::demos::{ConvergenceRate, DescentStep, GradientDescent, Playback, StepCursor};

/// Delay between steps while a demo is playing.
pub const DEFAULT_PLAYBACK_PERIOD: Duration = Duration::from_millis(500);

const CONVERGENCE_STEPS: u32 = 8;

/// The three error curves at one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergencePoint {
    pub iteration: u32,
    pub linear: f64,
    pub superlinear: f64,
    pub quadratic: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Demo {
    Descent(Playback<DescentStep>),
    Convergence(Playback<ConvergencePoint>),
}

pub(super) fn gradient_descent() -> Option<Demo> {
    let cursor = StepCursor::new(GradientDescent::default().trace())?;
    Some(Demo::Descent(Playback::new(cursor)))
}

pub(super) fn convergence() -> Option<Demo> {
    let points = (0..CONVERGENCE_STEPS)
        .map(|k| ConvergencePoint {
            iteration: k,
            linear: ConvergenceRate::Linear.error_at(k),
            superlinear: ConvergenceRate::Superlinear.error_at(k),
            quadratic: ConvergenceRate::Quadratic.error_at(k),
        })
        .collect();
    let cursor = StepCursor::new(points)?;
    Some(Demo::Convergence(Playback::new(cursor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_overtakes_linear() {
        let Some(Demo::Convergence(playback)) = convergence() else {
            panic!("expected convergence demo");
        };
        let last = playback.cursor().steps().last().copied().unwrap();
        assert!(last.quadratic < last.superlinear);
        assert!(last.superlinear < last.linear);
    }

    #[test]
    fn descent_demo_starts_paused_at_start() {
        let Some(Demo::Descent(playback)) = gradient_descent() else {
            panic!("expected descent demo");
        };
        assert!(!playback.is_playing());
        assert!(playback.cursor().is_at_start());
    }
}

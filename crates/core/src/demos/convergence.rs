use serde::{Deserialize, Serialize};

/// Shapes of the synthetic error curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceRate {
    /// `error_k = 0.5^k`
    Linear,
    /// `error_k = 1 / (k + 1)!`
    Superlinear,
    /// `error_k = 0.5^(2^k)`
    Quadratic,
}

impl ConvergenceRate {
    #[must_use]
    pub fn all() -> [ConvergenceRate; 3] {
        [
            ConvergenceRate::Linear,
            ConvergenceRate::Superlinear,
            ConvergenceRate::Quadratic,
        ]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ConvergenceRate::Linear => "linear",
            ConvergenceRate::Superlinear => "superlinear",
            ConvergenceRate::Quadratic => "quadratic",
        }
    }

    #[must_use]
    pub fn error_at(self, k: u32) -> f64 {
        match self {
            ConvergenceRate::Linear => 0.5_f64.powf(f64::from(k)),
            ConvergenceRate::Superlinear => {
                1.0 / (1..=k + 1).map(f64::from).product::<f64>()
            }
            ConvergenceRate::Quadratic => 0.5_f64.powf(2.0_f64.powf(f64::from(k))),
        }
    }
}

/// Errors for iterations `0..steps`.
#[must_use]
pub fn convergence_curve(rate: ConvergenceRate, steps: u32) -> Vec<f64> {
    (0..steps).map(|k| rate.error_at(k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_match_closed_forms() {
        assert_eq!(
            convergence_curve(ConvergenceRate::Linear, 4),
            vec![1.0, 0.5, 0.25, 0.125]
        );
        assert_eq!(
            convergence_curve(ConvergenceRate::Quadratic, 4),
            vec![0.5, 0.25, 0.0625, 0.003_906_25]
        );
        let superlinear = convergence_curve(ConvergenceRate::Superlinear, 4);
        assert_eq!(superlinear[0], 1.0);
        assert_eq!(superlinear[3], 1.0 / 24.0);
    }

    #[test]
    fn faster_rates_overtake_slower_ones() {
        let k = 5;
        assert!(ConvergenceRate::Quadratic.error_at(k) < ConvergenceRate::Superlinear.error_at(k));
        assert!(ConvergenceRate::Superlinear.error_at(k) < ConvergenceRate::Linear.error_at(k));
    }

    #[test]
    fn quadratic_underflows_to_zero_without_panicking() {
        assert_eq!(ConvergenceRate::Quadratic.error_at(40), 0.0);
    }
}

//! Two-variable linear programs, solved by vertex enumeration.
//!
//! Small enough for the graphical-method widgets: every constraint boundary
//! is intersected with every other (and with the axes), infeasible corners
//! are dropped and the best remaining corner wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EPS: f64 = 1e-7;
/// Artificial box used to detect unbounded problems.
const BOUND: f64 = 1e7;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LpError {
    #[error("coefficients must be finite")]
    NonFinite,

    #[error("feasible region is empty")]
    Infeasible,

    #[error("objective is unbounded over the feasible region")]
    Unbounded,

    #[error("no constraint at index {0}")]
    UnknownConstraint(usize),

    #[error("click tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),
}

//
// ─── MODEL ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    LessEq,
    GreaterEq,
    Equal,
}

/// `a·x + b·y (≤ | ≥ | =) rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub label: String,
    pub a: f64,
    pub b: f64,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    #[must_use]
    pub fn le(label: impl Into<String>, a: f64, b: f64, rhs: f64) -> Self {
        Self::new(label, a, b, Relation::LessEq, rhs)
    }

    #[must_use]
    pub fn ge(label: impl Into<String>, a: f64, b: f64, rhs: f64) -> Self {
        Self::new(label, a, b, Relation::GreaterEq, rhs)
    }

    #[must_use]
    pub fn eq(label: impl Into<String>, a: f64, b: f64, rhs: f64) -> Self {
        Self::new(label, a, b, Relation::Equal, rhs)
    }

    fn new(label: impl Into<String>, a: f64, b: f64, relation: Relation, rhs: f64) -> Self {
        Self {
            label: label.into(),
            a,
            b,
            relation,
            rhs,
        }
    }

    #[must_use]
    pub fn lhs(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y
    }

    /// Distance from the boundary on the feasible side; negative when violated.
    #[must_use]
    pub fn slack(&self, x: f64, y: f64) -> f64 {
        let lhs = self.lhs(x, y);
        match self.relation {
            Relation::LessEq => self.rhs - lhs,
            Relation::GreaterEq => lhs - self.rhs,
            Relation::Equal => -(lhs - self.rhs).abs(),
        }
    }

    #[must_use]
    pub fn is_satisfied(&self, x: f64, y: f64) -> bool {
        self.slack(x, y) >= -EPS * (1.0 + self.rhs.abs())
    }

    #[must_use]
    pub fn is_binding(&self, x: f64, y: f64) -> bool {
        self.slack(x, y).abs() <= EPS * (1.0 + self.rhs.abs())
    }

    fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.rhs.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub goal: Goal,
    pub cx: f64,
    pub cy: f64,
}

impl Objective {
    #[must_use]
    pub fn maximize(cx: f64, cy: f64) -> Self {
        Self {
            goal: Goal::Maximize,
            cx,
            cy,
        }
    }

    #[must_use]
    pub fn minimize(cx: f64, cy: f64) -> Self {
        Self {
            goal: Goal::Minimize,
            cx,
            cy,
        }
    }

    #[must_use]
    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.cx * x + self.cy * y
    }

    fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self.goal {
            Goal::Maximize => candidate > incumbent + EPS,
            Goal::Minimize => candidate < incumbent - EPS,
        }
    }
}

/// Optimal corner of the feasible region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// `x, y ≥ 0` are implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProgram2 {
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
}

impl LinearProgram2 {
    #[must_use]
    pub fn new(objective: Objective, constraints: Vec<Constraint>) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    #[must_use]
    pub fn is_feasible(&self, x: f64, y: f64) -> bool {
        x >= -EPS && y >= -EPS && self.constraints.iter().all(|c| c.is_satisfied(x, y))
    }

    /// Labels of the constraints that hold with equality at `(x, y)`.
    #[must_use]
    pub fn binding_at(&self, x: f64, y: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| c.is_binding(x, y))
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Every feasible corner of the region (within the detection box).
    ///
    /// # Errors
    ///
    /// Returns `LpError::NonFinite` for NaN/infinite coefficients.
    pub fn vertices(&self) -> Result<Vec<(f64, f64)>, LpError> {
        if !self.objective.cx.is_finite()
            || !self.objective.cy.is_finite()
            || self.constraints.iter().any(|c| !c.is_finite())
        {
            return Err(LpError::NonFinite);
        }

        let mut lines: Vec<(f64, f64, f64)> = self
            .constraints
            .iter()
            .map(|c| (c.a, c.b, c.rhs))
            .collect();
        lines.extend([
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (1.0, 0.0, BOUND),
            (0.0, 1.0, BOUND),
        ]);

        let mut corners: Vec<(f64, f64)> = Vec::new();
        for (i, &(a1, b1, c1)) in lines.iter().enumerate() {
            for &(a2, b2, c2) in &lines[i + 1..] {
                let det = a1 * b2 - a2 * b1;
                if det.abs() < EPS {
                    continue;
                }
                let x = (c1 * b2 - c2 * b1) / det;
                let y = (a1 * c2 - a2 * c1) / det;
                let inside_box = x <= BOUND * (1.0 + EPS) && y <= BOUND * (1.0 + EPS);
                if inside_box
                    && self.is_feasible(x, y)
                    && !corners
                        .iter()
                        .any(|&(px, py)| (px - x).abs() < EPS && (py - y).abs() < EPS)
                {
                    corners.push((x, y));
                }
            }
        }
        Ok(corners)
    }

    /// # Errors
    ///
    /// Returns `LpError::Infeasible` for an empty region, `LpError::Unbounded`
    /// when the objective improves without limit, `LpError::NonFinite` for bad input.
    pub fn solve(&self) -> Result<Vertex, LpError> {
        let corners = self.vertices()?;
        let on_box = |x: f64, y: f64| x >= BOUND * (1.0 - EPS) || y >= BOUND * (1.0 - EPS);

        let mut best: Option<Vertex> = None;
        for (x, y) in corners {
            let value = self.objective.value(x, y);
            let replace = match best {
                None => true,
                Some(incumbent) => {
                    self.objective.improves(value, incumbent.value)
                        || (!self.objective.improves(incumbent.value, value)
                            && on_box(incumbent.x, incumbent.y)
                            && !on_box(x, y))
                }
            };
            if replace {
                best = Some(Vertex { x, y, value });
            }
        }

        let best = best.ok_or(LpError::Infeasible)?;
        if on_box(best.x, best.y) {
            return Err(LpError::Unbounded);
        }
        Ok(best)
    }
}

//
// ─── OPTIMUM TARGET ────────────────────────────────────────────────────────────
//

/// Result of a click on the graphical-method canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCheck {
    pub hit: bool,
    pub distance: f64,
    pub optimum: Vertex,
}

/// "Click the optimal corner" exercise whose constraints can be edited.
///
/// The optimum is recomputed from the current constraints on every check,
/// so slider edits never leave a stale answer behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimumTarget {
    program: LinearProgram2,
    tolerance: f64,
}

impl OptimumTarget {
    /// # Errors
    ///
    /// Returns `LpError::InvalidTolerance` unless `tolerance` is finite and positive.
    pub fn new(program: LinearProgram2, tolerance: f64) -> Result<Self, LpError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(LpError::InvalidTolerance(tolerance));
        }
        Ok(Self { program, tolerance })
    }

    #[must_use]
    pub fn program(&self) -> &LinearProgram2 {
        &self.program
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Slider edit of a constraint's right-hand side.
    ///
    /// # Errors
    ///
    /// Returns `LpError::UnknownConstraint` for a bad index and
    /// `LpError::NonFinite` for a non-finite value.
    pub fn set_rhs(&mut self, index: usize, rhs: f64) -> Result<(), LpError> {
        if !rhs.is_finite() {
            return Err(LpError::NonFinite);
        }
        let constraint = self
            .program
            .constraints
            .get_mut(index)
            .ok_or(LpError::UnknownConstraint(index))?;
        constraint.rhs = rhs;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates [`LinearProgram2::solve`] errors.
    pub fn optimum(&self) -> Result<Vertex, LpError> {
        self.program.solve()
    }

    /// # Errors
    ///
    /// Propagates [`LinearProgram2::solve`] errors.
    pub fn check(&self, x: f64, y: f64) -> Result<TargetCheck, LpError> {
        let optimum = self.optimum()?;
        let distance = (x - optimum.x).hypot(y - optimum.y);
        Ok(TargetCheck {
            hit: distance <= self.tolerance,
            distance,
            optimum,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

//! Transportation-problem helpers for the initial-solution exercises.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    #[error("need at least one source and one destination")]
    Empty,

    #[error("cost matrix must be {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize },
}

/// Supplies, demands and per-unit shipping costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportProblem {
    supply: Vec<u32>,
    demand: Vec<u32>,
    costs: Vec<Vec<u32>>,
}

impl TransportProblem {
    /// # Errors
    ///
    /// Returns `TransportError` for empty sides or a cost matrix of the wrong shape.
    pub fn new(
        supply: Vec<u32>,
        demand: Vec<u32>,
        costs: Vec<Vec<u32>>,
    ) -> Result<Self, TransportError> {
        if supply.is_empty() || demand.is_empty() {
            return Err(TransportError::Empty);
        }
        if costs.len() != supply.len() || costs.iter().any(|row| row.len() != demand.len()) {
            return Err(TransportError::ShapeMismatch {
                rows: supply.len(),
                cols: demand.len(),
            });
        }
        Ok(Self {
            supply,
            demand,
            costs,
        })
    }

    #[must_use]
    pub fn supply(&self) -> &[u32] {
        &self.supply
    }

    #[must_use]
    pub fn demand(&self) -> &[u32] {
        &self.demand
    }

    #[must_use]
    pub fn costs(&self) -> &[Vec<u32>] {
        &self.costs
    }

    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.supply.iter().map(|&s| u64::from(s)).sum()
    }

    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.demand.iter().map(|&d| u64::from(d)).sum()
    }

    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    /// Adds a zero-cost dummy source or destination absorbing the imbalance.
    #[must_use]
    pub fn balanced(&self) -> Self {
        let mut out = self.clone();
        let supply = self.total_supply();
        let demand = self.total_demand();
        if supply > demand {
            let gap = u32::try_from(supply - demand).unwrap_or(u32::MAX);
            out.demand.push(gap);
            out.costs.iter_mut().for_each(|row| row.push(0));
        } else if demand > supply {
            let gap = u32::try_from(demand - supply).unwrap_or(u32::MAX);
            out.supply.push(gap);
            out.costs.push(vec![0; out.demand.len()]);
        }
        out
    }

    /// Initial basic feasible solution by the north-west corner rule.
    ///
    /// Unbalanced problems are balanced first, so the result may carry a
    /// dummy row or column.
    #[must_use]
    pub fn northwest_corner(&self) -> Vec<Vec<u32>> {
        let problem = self.balanced();
        let mut supply = problem.supply.clone();
        let mut demand = problem.demand.clone();
        let mut plan = vec![vec![0_u32; demand.len()]; supply.len()];

        let (mut i, mut j) = (0, 0);
        while i < supply.len() && j < demand.len() {
            let qty = supply[i].min(demand[j]);
            plan[i][j] = qty;
            supply[i] -= qty;
            demand[j] -= qty;
            if supply[i] == 0 {
                i += 1;
            } else {
                j += 1;
            }
        }
        plan
    }

    /// Shipping cost of `plan` against the (balanced) cost matrix.
    #[must_use]
    pub fn cost_of(&self, plan: &[Vec<u32>]) -> u64 {
        let problem = self.balanced();
        plan.iter()
            .zip(&problem.costs)
            .flat_map(|(qty_row, cost_row)| qty_row.iter().zip(cost_row))
            .map(|(&qty, &cost)| u64::from(qty) * u64::from(cost))
            .sum()
    }
}

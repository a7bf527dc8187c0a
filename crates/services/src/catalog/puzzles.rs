use practice_core::model::{ItemId, OrderingPuzzle, QuizItem};

use crate::error::PracticeError;

pub(super) fn puzzle_items() -> Result<Vec<QuizItem>, PracticeError> {
    Ok(vec![
        OrderingPuzzle::new(
            ItemId::new(1),
            "Put the steps of the graphical method in order.",
            [
                "Draw each constraint line",
                "Shade the feasible region",
                "List the corner points",
                "Evaluate the objective at each corner",
                "Pick the best corner",
            ],
        )?
        .with_explanation("An optimum of a bounded LP is always attained at a corner point.")
        .into(),
        OrderingPuzzle::new(
            ItemId::new(2),
            "Put one iteration of the simplex method in order.",
            [
                "Write the LP in standard form",
                "Start from a basic feasible solution",
                "Choose the entering variable by its reduced cost",
                "Choose the leaving variable by the ratio test",
                "Pivot and update the tableau",
            ],
        )?
        .with_explanation("The ratio test keeps the next basic solution feasible.")
        .into(),
        OrderingPuzzle::new(
            ItemId::new(3),
            "Put the steps of Newton's method in order.",
            [
                "Choose a starting point",
                "Compute the gradient and the Hessian",
                "Solve the Newton system for the step",
                "Update the iterate",
                "Stop once the gradient is small enough",
            ],
        )?
        .into(),
        OrderingPuzzle::new(
            ItemId::new(4),
            "Put the north-west corner rule in order.",
            [
                "Balance supply and demand",
                "Start at the top-left cell",
                "Ship as much as the row and column allow",
                "Move right if the column is satisfied, down if the row is exhausted",
            ],
        )?
        .with_explanation("The result is a basic feasible solution, not necessarily the cheapest one.")
        .into(),
    ])
}

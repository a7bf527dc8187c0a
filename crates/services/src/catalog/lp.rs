//! Linear-programming widgets. Correct answers are computed from the
//! problem data, so editing a coefficient keeps the bank consistent.

use practice_core::lp2d::{Constraint, LinearProgram2, Objective, OptimumTarget};
use practice_core::model::{ChoiceQuestion, CornerQuestion, ItemId, NumericQuestion, QuizItem};
use practice_core::transport::TransportProblem;

use crate::error::PracticeError;

const TOLERANCE: f64 = 0.01;
/// How far from the optimal corner a pick may land on the canvas.
const CORNER_TOLERANCE: f64 = 0.25;

/// Cost per unit of two foods; minimum daily protein, vitamins and iron.
pub(crate) fn diet_program() -> LinearProgram2 {
    LinearProgram2::new(
        Objective::minimize(0.6, 0.35),
        vec![
            Constraint::ge("protein", 5.0, 7.0, 8.0),
            Constraint::ge("vitamins", 4.0, 2.0, 15.0),
            Constraint::ge("iron", 2.0, 1.0, 3.0),
        ],
    )
}

/// Profit per batch of two products; weekly hours in three plants.
pub(crate) fn manufacturing_program() -> LinearProgram2 {
    LinearProgram2::new(
        Objective::maximize(3.0, 5.0),
        vec![
            Constraint::le("plant 1", 1.0, 0.0, 4.0),
            Constraint::le("plant 2", 0.0, 2.0, 12.0),
            Constraint::le("plant 3", 3.0, 2.0, 18.0),
        ],
    )
}

pub(crate) fn transport_problem() -> Result<TransportProblem, PracticeError> {
    Ok(TransportProblem::new(
        vec![20, 30],
        vec![10, 25, 15],
        vec![vec![8, 6, 10], vec![9, 12, 13]],
    )?)
}

fn labels(program: &LinearProgram2) -> Vec<String> {
    program
        .constraints
        .iter()
        .map(|c| c.label.clone())
        .collect()
}

pub(super) fn diet_items() -> Result<Vec<QuizItem>, PracticeError> {
    let program = diet_program();
    let optimum = program.solve()?;
    let mut options = labels(&program);
    let binding = program.binding_at(optimum.x, optimum.y);
    let binding_index = options
        .iter()
        .position(|label| binding.first().is_some_and(|b| b == label))
        .unwrap_or(options.len());
    options.push("none of them".to_string());

    Ok(vec![
        NumericQuestion::new(
            ItemId::new(1),
            "What is the minimum daily cost of the diet?",
            optimum.value,
            TOLERANCE,
        )?
        .with_unit("$")
        .with_explanation(format!(
            "The cheapest feasible corner is ({:.2}, {:.2}), costing {:.2}.",
            optimum.x, optimum.y, optimum.value
        ))
        .into(),
        NumericQuestion::new(
            ItemId::new(2),
            "How many units of food A does the cheapest diet use?",
            optimum.x,
            TOLERANCE,
        )?
        .with_explanation("Food A supplies vitamins more cheaply per unit than food B.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(3),
            "Which nutrient requirement is met exactly at the optimum?",
            options,
            binding_index,
        )?
        .with_explanation(
            "A constraint is binding when its left-hand side equals the requirement; the others have surplus.",
        )
        .into(),
        ChoiceQuestion::new(
            ItemId::new(4),
            "Why are the diet constraints written with \u{2265}?",
            vec![
                "Each food has a limited supply",
                "The budget caps total spending",
                "Each nutrient has a minimum daily requirement",
            ],
            2,
        )?
        .with_explanation("The diet must supply at least the required amount of every nutrient.")
        .into(),
        CornerQuestion::new(
            ItemId::new(5),
            "Which corner of the feasible region is the cheapest diet? Give units of A and B.",
            OptimumTarget::new(program, CORNER_TOLERANCE)?,
        )?
        .with_explanation("Evaluate the cost at every corner; the minimum sits where the vitamins line meets the food A axis.")
        .into(),
    ])
}

pub(super) fn manufacturing_items() -> Result<Vec<QuizItem>, PracticeError> {
    let program = manufacturing_program();
    let optimum = program.solve()?;
    let options = labels(&program);
    let slack_plant = program
        .constraints
        .iter()
        .position(|c| !c.is_binding(optimum.x, optimum.y))
        .unwrap_or(0);
    let slack_hours = program.constraints[slack_plant].slack(optimum.x, optimum.y);

    Ok(vec![
        NumericQuestion::new(
            ItemId::new(1),
            "What is the maximum weekly profit (in thousands)?",
            optimum.value,
            TOLERANCE,
        )?
        .with_explanation(format!(
            "Profit peaks at the corner ({:.0}, {:.0}) with value {:.0}.",
            optimum.x, optimum.y, optimum.value
        ))
        .into(),
        NumericQuestion::new(
            ItemId::new(2),
            "How many batches of product 2 should be made per week?",
            optimum.y,
            TOLERANCE,
        )?
        .with_explanation("Product 2 earns more per batch and is limited by plant 2.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(3),
            "Which plant has unused hours at the optimum?",
            options,
            slack_plant,
        )?
        .with_explanation("Only the non-binding constraint leaves capacity unused.")
        .into(),
        NumericQuestion::new(
            ItemId::new(4),
            "How many hours per week are left unused in that plant?",
            slack_hours,
            TOLERANCE,
        )?
        .with_unit("h")
        .with_explanation("Slack is the right-hand side minus the hours used at the optimum.")
        .into(),
        CornerQuestion::new(
            ItemId::new(5),
            "Which corner of the feasible region maximizes profit? Give batches of products 1 and 2.",
            OptimumTarget::new(program, CORNER_TOLERANCE)?,
        )?
        .with_explanation("The iso-profit line leaves the region last at the corner where plants 2 and 3 are both full.")
        .into(),
    ])
}

pub(super) fn transportation_items() -> Result<Vec<QuizItem>, PracticeError> {
    let problem = transport_problem()?;
    let plan = problem.northwest_corner();
    let cost = problem.cost_of(&plan);
    let basic = problem.supply().len() + problem.demand().len() - 1;

    Ok(vec![
        ChoiceQuestion::new(
            ItemId::new(1),
            &format!(
                "Total supply is {} and total demand is {}. Is the problem balanced?",
                problem.total_supply(),
                problem.total_demand()
            ),
            vec!["No", "Yes"],
            usize::from(problem.is_balanced()),
        )?
        .with_explanation("A problem is balanced when total supply equals total demand.")
        .into(),
        NumericQuestion::new(
            ItemId::new(2),
            "What is the total cost of the north-west corner solution?",
            cost as f64,
            TOLERANCE,
        )?
        .with_explanation(
            "Fill cells from the top-left, moving right when a column is satisfied and down when a row is exhausted.",
        )
        .into(),
        NumericQuestion::new(
            ItemId::new(3),
            "How many basic variables does a non-degenerate basic solution have?",
            basic as f64,
            0.0,
        )?
        .with_explanation("With m sources and n destinations a basic solution has m + n - 1 basic cells.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(4),
            "Supply exceeds demand. What do you add to balance the problem?",
            vec![
                "A dummy source with zero costs",
                "A dummy destination with zero costs",
                "Nothing, the method still works",
            ],
            1,
        )?
        .with_explanation("The dummy destination absorbs the surplus supply at no cost.")
        .into(),
    ])
}

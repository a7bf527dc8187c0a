use practice_core::demos::{ConvergenceRate, GradientDescent, convergence_curve};
use practice_core::model::{ChoiceQuestion, ItemId, NumericQuestion, QuizItem};

use crate::error::PracticeError;

pub(super) const SUPER_BRAIN_SECONDS: u32 = 60;

fn binomial(n: u64, k: u64) -> u64 {
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

pub(super) fn formula_items() -> Result<Vec<QuizItem>, PracticeError> {
    Ok(vec![
        ChoiceQuestion::new(
            ItemId::new(1),
            "What is the gradient of f(x, y) = x\u{b2} + 3xy?",
            vec!["(2x, 3y)", "(x + 3y, 3xy)", "(2x + 3y, 3x)", "(2x + 3, 3x)"],
            2,
        )?
        .with_explanation("Differentiate with respect to x and y separately.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(2),
            "Which update is Newton's method for minimizing f(x)?",
            vec![
                "x - f(x) / f'(x)",
                "x - f'(x) / f''(x)",
                "x - \u{3b1} f'(x)",
                "x + f''(x) / f'(x)",
            ],
            1,
        )?
        .with_explanation("Newton's method finds a root of f' using the second derivative.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(3),
            "Which KKT condition is complementary slackness?",
            vec![
                "\u{2207}f(x) = 0",
                "g\u{1d62}(x) \u{2264} 0 for every inequality",
                "\u{3bb}\u{1d62} \u{2265} 0",
                "\u{3bb}\u{1d62} g\u{1d62}(x) = 0 for every inequality",
            ],
            3,
        )?
        .with_explanation(
            "Either a constraint is active or its multiplier is zero; dual feasibility and primal feasibility are separate conditions.",
        )
        .into(),
        ChoiceQuestion::new(
            ItemId::new(4),
            "If the Hessian of f is positive definite everywhere, f is…",
            vec!["concave", "linear", "strictly convex", "not enough information"],
            2,
        )?
        .with_explanation("A positive definite Hessian means positive curvature in every direction.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(5),
            "What is the Lagrangian of minimizing f(x) subject to h(x) = 0?",
            vec![
                "f(x) \u{b7} h(x)",
                "f(x) + \u{3bb} h(x)",
                "\u{3bb} f(x)",
                "f(x) - \u{3bb} h(x)",
            ],
            1,
        )?
        .also_correct(3)?
        .with_explanation("The sign in front of \u{3bb} is a convention; both give the same stationary points.")
        .into(),
    ])
}

pub(super) fn problem_size_items() -> Result<Vec<QuizItem>, PracticeError> {
    let (vars, constraints) = (3_u64, 4_u64);
    let total = vars + constraints;
    Ok(vec![
        NumericQuestion::new(
            ItemId::new(1),
            "An LP has 3 decision variables and 4 \u{2264} constraints. How many slack variables does standard form add?",
            constraints as f64,
            0.0,
        )?
        .with_explanation("Each \u{2264} constraint gets its own slack variable.")
        .into(),
        NumericQuestion::new(
            ItemId::new(2),
            "How many variables does that standard form have in total?",
            total as f64,
            0.0,
        )?
        .with_explanation("Decision variables plus slack variables.")
        .into(),
        NumericQuestion::new(
            ItemId::new(3),
            "How many basic variables does each of its basic solutions have?",
            constraints as f64,
            0.0,
        )?
        .with_explanation("One basic variable per equality constraint.")
        .into(),
        NumericQuestion::new(
            ItemId::new(4),
            "At most how many basic solutions can it have?",
            binomial(total, constraints) as f64,
            0.0,
        )?
        .with_explanation("Choose which 4 of the 7 variables are basic: C(7, 4).")
        .into(),
        NumericQuestion::new(
            ItemId::new(5),
            "With 10 decision variables and 5 \u{2264} constraints, at most how many basic solutions are there?",
            binomial(15, 5) as f64,
            0.0,
        )?
        .with_explanation("C(15, 5): the count grows far faster than the problem size.")
        .into(),
    ])
}

pub(super) fn super_brain_items() -> Result<Vec<QuizItem>, PracticeError> {
    let descent = GradientDescent::default();
    let trace = descent.trace();
    let (start, first) = (trace[0], trace[1]);
    let linear = convergence_curve(ConvergenceRate::Linear, 4);

    Ok(vec![
        NumericQuestion::new(
            ItemId::new(1),
            &format!(
                "One gradient step on x\u{b2} + y\u{b2} from ({}, {}) with step {}: what is the new x?",
                start.x, start.y, descent.step_size
            ),
            first.x,
            0.001,
        )?
        .with_explanation("x - step \u{b7} 2x.")
        .into(),
        ChoiceQuestion::new(
            ItemId::new(2),
            "Near a solution, Newton's method converges…",
            vec!["linearly", "superlinearly but not quadratically", "quadratically"],
            2,
        )?
        .into(),
        NumericQuestion::new(
            ItemId::new(3),
            "The error halves every step starting from 1. What is it after 3 steps?",
            linear[3],
            0.001,
        )?
        .into(),
        ChoiceQuestion::new(
            ItemId::new(4),
            "The feasible region of a linear program is always…",
            vec!["bounded", "convex", "non-empty", "a triangle"],
            1,
        )?
        .into(),
        NumericQuestion::new(
            ItemId::new(5),
            &format!("What is x\u{b2} + y\u{b2} at ({}, {})?", start.x, start.y),
            start.value,
            0.0,
        )?
        .into(),
        ChoiceQuestion::new(
            ItemId::new(6),
            "A constraint with zero slack at the optimum is called…",
            vec!["redundant", "degenerate", "binding", "infeasible"],
            2,
        )?
        .into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::{PracticeItem, QuizResponse};

    #[test]
    fn binomial_counts() {
        assert_eq!(binomial(7, 4), 35);
        assert_eq!(binomial(15, 5), 3003);
        assert_eq!(binomial(5, 0), 1);
    }

    #[test]
    fn problem_size_answers_are_exact() {
        let items = problem_size_items().unwrap();
        assert!(items[3].is_correct(&QuizResponse::Number(35.0)));
        assert!(!items[3].is_correct(&QuizResponse::Number(34.0)));
        assert!(items[4].is_correct(&QuizResponse::Number(3003.0)));
    }

    #[test]
    fn super_brain_answers_follow_the_demos() {
        let items = super_brain_items().unwrap();
        assert!(items[0].is_correct(&QuizResponse::Number(3.2)));
        assert!(items[2].is_correct(&QuizResponse::Number(0.125)));
        assert!(items[4].is_correct(&QuizResponse::Number(25.0)));
    }

    #[test]
    fn lagrangian_accepts_either_sign_convention() {
        let items = formula_items().unwrap();
        assert!(items[4].is_correct(&QuizResponse::Choice(1)));
        assert!(items[4].is_correct(&QuizResponse::Choice(3)));
        assert!(!items[4].is_correct(&QuizResponse::Choice(0)));
    }
}

use practice_core::MatchingPairs;
use practice_core::pairs::PairsError;

const PAIRS: [(&str, &str); 6] = [
    ("Feasible region", "Points satisfying every constraint"),
    ("Slack variable", "Unused amount of a \u{2264} resource"),
    ("Binding constraint", "Holds with equality at the optimum"),
    ("Gradient", "Direction of steepest ascent"),
    ("Hessian", "Matrix of second derivatives"),
    ("Lagrange multiplier", "Shadow price of a constraint"),
];

pub(super) fn board() -> Result<MatchingPairs, PairsError> {
    MatchingPairs::from_pairs(PAIRS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_has_a_card_per_term_and_definition() {
        let board = board().unwrap();
        assert_eq!(board.cards().len(), PAIRS.len() * 2);
        assert_eq!(board.max_score(), 6);
    }
}

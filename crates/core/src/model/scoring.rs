/// How many points a committed answer is worth.
///
/// Implementations must award nothing for an incorrect answer; the session
/// relies on that to keep its score within `max_score`.
pub trait ScoringRule {
    fn award(&self, item_points: u32, is_correct: bool) -> u32;

    /// Points a correct answer on this item would earn.
    fn max_award(&self, item_points: u32) -> u32 {
        self.award(item_points, true)
    }
}

/// Awards the item's own point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPoints;

impl ScoringRule for ItemPoints {
    fn award(&self, item_points: u32, is_correct: bool) -> u32 {
        if is_correct { item_points } else { 0 }
    }
}

/// Awards the same number of points for every correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatPoints(pub u32);

impl ScoringRule for FlatPoints {
    fn award(&self, _item_points: u32, is_correct: bool) -> u32 {
        if is_correct { self.0 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incorrect_answers_award_nothing() {
        assert_eq!(ItemPoints.award(3, false), 0);
        assert_eq!(FlatPoints(5).award(3, false), 0);
    }

    #[test]
    fn flat_points_ignore_item_value() {
        assert_eq!(FlatPoints(5).award(3, true), 5);
        assert_eq!(ItemPoints.max_award(3), 3);
    }
}

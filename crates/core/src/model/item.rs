use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::input::coerce_numeric;
use crate::lp2d::{LpError, OptimumTarget, Vertex};
use crate::model::ids::ItemId;
use crate::shuffle::Shuffler;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("item prompt cannot be empty")]
    EmptyPrompt,

    #[error("choice question needs at least two options")]
    TooFewOptions,

    #[error("correct option {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("item points must be > 0")]
    ZeroPoints,

    #[error("numeric tolerance must be finite and >= 0, got {provided}")]
    InvalidTolerance { provided: f64 },

    #[error("expected numeric answer must be finite")]
    NonFiniteExpected,

    #[error("ordering puzzle needs at least two steps")]
    TooFewSteps,
}

//
// ─── ITEM TRAIT ────────────────────────────────────────────────────────────────
//

/// A single question, card or puzzle within a session.
pub trait PracticeItem {
    /// What the user commits when answering.
    type Response: Clone + fmt::Debug + PartialEq;

    fn id(&self) -> ItemId;

    fn prompt(&self) -> &str;

    /// Compares a response against the item's known-correct value(s).
    fn is_correct(&self, response: &Self::Response) -> bool;

    /// Fixed point value awarded for a correct answer.
    fn points(&self) -> u32 {
        1
    }

    /// Explanation shown once the answer is revealed.
    fn explanation(&self) -> Option<&str>;
}

fn validate_prompt(prompt: &str) -> Result<String, ItemError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ItemError::EmptyPrompt);
    }
    Ok(trimmed.to_string())
}

fn normalize_explanation(explanation: impl Into<String>) -> Option<String> {
    let explanation = explanation.into();
    let trimmed = explanation.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

//
// ─── CHOICE QUESTION ───────────────────────────────────────────────────────────
//

/// Single-choice question; one or more option indices are accepted as correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    id: ItemId,
    prompt: String,
    options: Vec<String>,
    correct: Vec<usize>,
    explanation: Option<String>,
    points: u32,
}

impl ChoiceQuestion {
    /// # Errors
    ///
    /// Returns `ItemError` if the prompt is blank, fewer than two options are
    /// given, or `correct` does not index an option.
    pub fn new<S: Into<String>>(
        id: ItemId,
        prompt: &str,
        options: impl IntoIterator<Item = S>,
        correct: usize,
    ) -> Result<Self, ItemError> {
        let prompt = validate_prompt(prompt)?;
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.len() < 2 {
            return Err(ItemError::TooFewOptions);
        }
        if correct >= options.len() {
            return Err(ItemError::CorrectIndexOutOfRange {
                index: correct,
                len: options.len(),
            });
        }
        Ok(Self {
            id,
            prompt,
            options,
            correct: vec![correct],
            explanation: None,
            points: 1,
        })
    }

    /// Accepts another option as correct.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::CorrectIndexOutOfRange` for an unknown option.
    pub fn also_correct(mut self, index: usize) -> Result<Self, ItemError> {
        if index >= self.options.len() {
            return Err(ItemError::CorrectIndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        if !self.correct.contains(&index) {
            self.correct.push(index);
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = normalize_explanation(explanation);
        self
    }

    /// # Errors
    ///
    /// Returns `ItemError::ZeroPoints` when `points` is zero.
    pub fn with_points(mut self, points: u32) -> Result<Self, ItemError> {
        if points == 0 {
            return Err(ItemError::ZeroPoints);
        }
        self.points = points;
        Ok(self)
    }

    /// Present the options in a random order; accepted answers follow
    /// their options.
    #[must_use]
    pub fn with_shuffled_options(mut self, shuffler: &mut Shuffler) -> Self {
        let order = shuffler.permutation(self.options.len());
        let mut slots: Vec<Option<String>> = self.options.into_iter().map(Some).collect();
        self.options = order
            .iter()
            .filter_map(|&old| slots.get_mut(old).and_then(Option::take))
            .collect();
        self.correct = order
            .iter()
            .enumerate()
            .filter(|&(_, old)| self.correct.contains(old))
            .map(|(new, _)| new)
            .collect();
        self
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_options(&self) -> &[usize] {
        &self.correct
    }
}

impl PracticeItem for ChoiceQuestion {
    type Response = usize;

    fn id(&self) -> ItemId {
        self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn is_correct(&self, response: &usize) -> bool {
        self.correct.contains(response)
    }

    fn points(&self) -> u32 {
        self.points
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

//
// ─── NUMERIC QUESTION ──────────────────────────────────────────────────────────
//

/// Free-form numeric answer checked against an expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericQuestion {
    id: ItemId,
    prompt: String,
    expected: f64,
    tolerance: f64,
    unit: Option<String>,
    explanation: Option<String>,
    points: u32,
}

impl NumericQuestion {
    /// # Errors
    ///
    /// Returns `ItemError` for a blank prompt, a non-finite expected value or
    /// a negative/non-finite tolerance.
    pub fn new(
        id: ItemId,
        prompt: &str,
        expected: f64,
        tolerance: f64,
    ) -> Result<Self, ItemError> {
        let prompt = validate_prompt(prompt)?;
        if !expected.is_finite() {
            return Err(ItemError::NonFiniteExpected);
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ItemError::InvalidTolerance {
                provided: tolerance,
            });
        }
        Ok(Self {
            id,
            prompt,
            expected,
            tolerance,
            unit: None,
            explanation: None,
            points: 1,
        })
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = normalize_explanation(unit);
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = normalize_explanation(explanation);
        self
    }

    /// # Errors
    ///
    /// Returns `ItemError::ZeroPoints` when `points` is zero.
    pub fn with_points(mut self, points: u32) -> Result<Self, ItemError> {
        if points == 0 {
            return Err(ItemError::ZeroPoints);
        }
        self.points = points;
        Ok(self)
    }

    #[must_use]
    pub fn expected(&self) -> f64 {
        self.expected
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Turns raw field text into a response, coercing garbage to zero.
    #[must_use]
    pub fn parse_response(raw: &str) -> f64 {
        coerce_numeric(raw)
    }
}

impl PracticeItem for NumericQuestion {
    type Response = f64;

    fn id(&self) -> ItemId {
        self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn is_correct(&self, response: &f64) -> bool {
        response.is_finite() && (response - self.expected).abs() <= self.tolerance
    }

    fn points(&self) -> u32 {
        self.points
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

//
// ─── ORDERING PUZZLE ───────────────────────────────────────────────────────────
//

/// Put the steps of a procedure in order.
///
/// `steps` are stored in their correct order; a response lists step indices
/// in the order the user arranged them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingPuzzle {
    id: ItemId,
    prompt: String,
    steps: Vec<String>,
    display_order: Vec<usize>,
    explanation: Option<String>,
    points: u32,
}

impl OrderingPuzzle {
    /// # Errors
    ///
    /// Returns `ItemError` for a blank prompt or fewer than two steps.
    pub fn new<S: Into<String>>(
        id: ItemId,
        prompt: &str,
        steps: impl IntoIterator<Item = S>,
    ) -> Result<Self, ItemError> {
        let prompt = validate_prompt(prompt)?;
        let steps: Vec<String> = steps.into_iter().map(Into::into).collect();
        if steps.len() < 2 {
            return Err(ItemError::TooFewSteps);
        }
        // Rotated by one so the steps are never shown already solved.
        let display_order = (1..steps.len()).chain(std::iter::once(0)).collect();
        Ok(Self {
            id,
            prompt,
            steps,
            display_order,
            explanation: None,
            points: 1,
        })
    }

    /// Show the steps in a random order instead of the default rotation.
    #[must_use]
    pub fn with_shuffled_display(mut self, shuffler: &mut Shuffler) -> Self {
        self.display_order = shuffler.permutation(self.steps.len());
        self
    }

    /// Step indices in the order they are presented.
    #[must_use]
    pub fn display_order(&self) -> &[usize] {
        &self.display_order
    }

    /// Steps in the order they are presented.
    pub fn displayed_steps(&self) -> impl Iterator<Item = &str> {
        self.display_order.iter().map(|&idx| self.steps[idx].as_str())
    }

    /// Translate picks of displayed positions into a response.
    ///
    /// Positions that do not exist are dropped, which makes the response
    /// incomplete and therefore incorrect.
    #[must_use]
    pub fn response_from_display(&self, picks: &[usize]) -> Vec<usize> {
        picks
            .iter()
            .filter_map(|&pos| self.display_order.get(pos).copied())
            .collect()
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = normalize_explanation(explanation);
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}

impl PracticeItem for OrderingPuzzle {
    type Response = Vec<usize>;

    fn id(&self) -> ItemId {
        self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn is_correct(&self, response: &Vec<usize>) -> bool {
        response.len() == self.steps.len() && response.iter().copied().eq(0..self.steps.len())
    }

    fn points(&self) -> u32 {
        self.points
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

//
// ─── OPTIMAL CORNER ────────────────────────────────────────────────────────────
//

/// Point the optimal corner of a two-variable LP.
///
/// Graded against the optimum of the target's current constraints, within
/// the target's click tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerQuestion {
    id: ItemId,
    prompt: String,
    target: OptimumTarget,
    explanation: Option<String>,
}

impl CornerQuestion {
    /// # Errors
    ///
    /// Returns `ItemError::EmptyPrompt` for a blank prompt.
    pub fn new(id: ItemId, prompt: &str, target: OptimumTarget) -> Result<Self, ItemError> {
        Ok(Self {
            id,
            prompt: validate_prompt(prompt)?,
            target,
            explanation: None,
        })
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = normalize_explanation(explanation);
        self
    }

    #[must_use]
    pub fn target(&self) -> &OptimumTarget {
        &self.target
    }

    /// Where the corner currently is.
    ///
    /// # Errors
    ///
    /// Propagates the solver's `LpError`.
    pub fn optimum(&self) -> Result<Vertex, LpError> {
        self.target.optimum()
    }
}

impl PracticeItem for CornerQuestion {
    type Response = (f64, f64);

    fn id(&self) -> ItemId {
        self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    /// An LP with no optimum has no right corner.
    fn is_correct(&self, &(x, y): &(f64, f64)) -> bool {
        x.is_finite()
            && y.is_finite()
            && self.target.check(x, y).is_ok_and(|check| check.hit)
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

//
// ─── MIXED QUIZ ITEMS ──────────────────────────────────────────────────────────
//

/// Any of the item kinds, for widgets that mix them in one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuizItem {
    Choice(ChoiceQuestion),
    Numeric(NumericQuestion),
    Ordering(OrderingPuzzle),
    Corner(CornerQuestion),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuizResponse {
    Choice(usize),
    Number(f64),
    Order(Vec<usize>),
    Point(f64, f64),
}

impl PracticeItem for QuizItem {
    type Response = QuizResponse;

    fn id(&self) -> ItemId {
        match self {
            QuizItem::Choice(q) => q.id(),
            QuizItem::Numeric(q) => q.id(),
            QuizItem::Ordering(q) => q.id(),
            QuizItem::Corner(q) => q.id(),
        }
    }

    fn prompt(&self) -> &str {
        match self {
            QuizItem::Choice(q) => q.prompt(),
            QuizItem::Numeric(q) => q.prompt(),
            QuizItem::Ordering(q) => q.prompt(),
            QuizItem::Corner(q) => q.prompt(),
        }
    }

    /// A response of the wrong kind is simply incorrect.
    fn is_correct(&self, response: &QuizResponse) -> bool {
        match (self, response) {
            (QuizItem::Choice(q), QuizResponse::Choice(idx)) => q.is_correct(idx),
            (QuizItem::Numeric(q), QuizResponse::Number(value)) => q.is_correct(value),
            (QuizItem::Ordering(q), QuizResponse::Order(order)) => q.is_correct(order),
            (QuizItem::Corner(q), QuizResponse::Point(x, y)) => q.is_correct(&(*x, *y)),
            _ => false,
        }
    }

    fn points(&self) -> u32 {
        match self {
            QuizItem::Choice(q) => q.points(),
            QuizItem::Numeric(q) => q.points(),
            QuizItem::Ordering(q) => q.points(),
            QuizItem::Corner(q) => q.points(),
        }
    }

    fn explanation(&self) -> Option<&str> {
        match self {
            QuizItem::Choice(q) => q.explanation(),
            QuizItem::Numeric(q) => q.explanation(),
            QuizItem::Ordering(q) => q.explanation(),
            QuizItem::Corner(q) => q.explanation(),
        }
    }
}

impl From<ChoiceQuestion> for QuizItem {
    fn from(q: ChoiceQuestion) -> Self {
        QuizItem::Choice(q)
    }
}

impl From<NumericQuestion> for QuizItem {
    fn from(q: NumericQuestion) -> Self {
        QuizItem::Numeric(q)
    }
}

impl From<OrderingPuzzle> for QuizItem {
    fn from(q: OrderingPuzzle) -> Self {
        QuizItem::Ordering(q)
    }
}

impl From<CornerQuestion> for QuizItem {
    fn from(q: CornerQuestion) -> Self {
        QuizItem::Corner(q)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_question_rejects_out_of_range_answer() {
        let err = ChoiceQuestion::new(ItemId::new(1), "Pick", ["a", "b"], 2).unwrap_err();
        assert_eq!(err, ItemError::CorrectIndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn choice_question_accepts_extra_correct_options() {
        let q = ChoiceQuestion::new(ItemId::new(1), "Pick", ["a", "b", "c"], 0)
            .unwrap()
            .also_correct(2)
            .unwrap();
        assert!(q.is_correct(&0));
        assert!(!q.is_correct(&1));
        assert!(q.is_correct(&2));
    }

    #[test]
    fn shuffled_options_keep_the_right_answers_right() {
        let mut shuffler = Shuffler::seeded(3);
        let q = ChoiceQuestion::new(ItemId::new(1), "Pick", ["a", "b", "c", "d", "e"], 1)
            .unwrap()
            .also_correct(3)
            .unwrap()
            .with_shuffled_options(&mut shuffler);

        let mut options = q.options().to_vec();
        options.sort();
        assert_eq!(options, vec!["a", "b", "c", "d", "e"]);

        let mut accepted: Vec<&str> = q
            .correct_options()
            .iter()
            .map(|&idx| q.options()[idx].as_str())
            .collect();
        accepted.sort_unstable();
        assert_eq!(accepted, vec!["b", "d"]);
        for idx in 0..q.options().len() {
            assert_eq!(q.is_correct(&idx), q.correct_options().contains(&idx));
        }
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = NumericQuestion::new(ItemId::new(1), "   ", 1.0, 0.1).unwrap_err();
        assert_eq!(err, ItemError::EmptyPrompt);
    }

    #[test]
    fn numeric_question_uses_tolerance() {
        let q = NumericQuestion::new(ItemId::new(2), "Cost?", 2.25, 0.01).unwrap();
        assert!(q.is_correct(&2.255));
        assert!(!q.is_correct(&2.3));
        assert!(!q.is_correct(&f64::NAN));
    }

    #[test]
    fn malformed_numeric_field_scores_as_zero() {
        let q = NumericQuestion::new(ItemId::new(3), "Slack at optimum?", 0.0, 0.0).unwrap();
        let response = NumericQuestion::parse_response("not a number");
        assert!(q.is_correct(&response));
    }

    #[test]
    fn ordering_puzzle_requires_full_order() {
        let q = OrderingPuzzle::new(ItemId::new(4), "Order", ["a", "b", "c"]).unwrap();
        assert!(q.is_correct(&vec![0, 1, 2]));
        assert!(!q.is_correct(&vec![0, 2, 1]));
        assert!(!q.is_correct(&vec![0, 1]));
    }

    #[test]
    fn ordering_puzzle_maps_displayed_positions() {
        let q = OrderingPuzzle::new(ItemId::new(4), "Order", ["a", "b", "c"]).unwrap();
        assert_eq!(q.displayed_steps().collect::<Vec<_>>(), vec!["b", "c", "a"]);
        let response = q.response_from_display(&[2, 0, 1]);
        assert_eq!(response, vec![0, 1, 2]);
        assert!(q.is_correct(&response));
        assert!(!q.is_correct(&q.response_from_display(&[2, 0, 7])));
    }

    #[test]
    fn shuffled_display_is_a_permutation() {
        let mut shuffler = Shuffler::seeded(1);
        let q = OrderingPuzzle::new(ItemId::new(4), "Order", ["a", "b", "c", "d"])
            .unwrap()
            .with_shuffled_display(&mut shuffler);
        let mut order = q.display_order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn quiz_item_rejects_mismatched_response_kind() {
        let item: QuizItem = ChoiceQuestion::new(ItemId::new(5), "Pick", ["a", "b"], 1)
            .unwrap()
            .into();
        assert!(item.is_correct(&QuizResponse::Choice(1)));
        assert!(!item.is_correct(&QuizResponse::Number(1.0)));
    }

    #[test]
    fn corner_question_follows_edited_constraints() {
        use crate::lp2d::{Constraint, LinearProgram2, Objective};

        let program = LinearProgram2::new(
            Objective::maximize(3.0, 5.0),
            vec![
                Constraint::le("plant 1", 1.0, 0.0, 4.0),
                Constraint::le("plant 2", 0.0, 2.0, 12.0),
                Constraint::le("plant 3", 3.0, 2.0, 18.0),
            ],
        );
        let target = OptimumTarget::new(program, 0.2).unwrap();
        let q = CornerQuestion::new(ItemId::new(7), "Pick the best corner", target).unwrap();
        assert!(q.is_correct(&(2.1, 6.0)));
        assert!(!q.is_correct(&(4.0, 3.0)));
        assert!(!q.is_correct(&(f64::NAN, 6.0)));

        let item: QuizItem = q.into();
        assert!(item.is_correct(&QuizResponse::Point(2.0, 6.0)));
        assert!(!item.is_correct(&QuizResponse::Number(2.0)));
    }

    #[test]
    fn zero_points_are_rejected() {
        let err = ChoiceQuestion::new(ItemId::new(6), "Pick", ["a", "b"], 0)
            .unwrap()
            .with_points(0)
            .unwrap_err();
        assert_eq!(err, ItemError::ZeroPoints);
    }
}

#![allow(dead_code)]

use practice_core::model::{QuizItem, QuizResponse};
use services::PracticeLoop;
use practice_core::model::FlatPoints;

/// A response the item accepts.
pub fn correct_response(item: &QuizItem) -> QuizResponse {
    match item {
        QuizItem::Choice(q) => QuizResponse::Choice(q.correct_options()[0]),
        QuizItem::Numeric(q) => QuizResponse::Number(q.expected()),
        QuizItem::Ordering(q) => QuizResponse::Order((0..q.steps().len()).collect()),
        QuizItem::Corner(q) => {
            let corner = q.optimum().unwrap();
            QuizResponse::Point(corner.x, corner.y)
        }
    }
}

/// A response the item rejects.
pub fn wrong_response(item: &QuizItem) -> QuizResponse {
    match item {
        QuizItem::Choice(q) => {
            let wrong = (0..q.options().len())
                .find(|idx| !q.correct_options().contains(idx))
                .unwrap();
            QuizResponse::Choice(wrong)
        }
        QuizItem::Numeric(q) => QuizResponse::Number(q.expected() + q.tolerance() + 1.0),
        QuizItem::Ordering(q) => QuizResponse::Order((0..q.steps().len()).rev().collect()),
        QuizItem::Corner(q) => {
            let corner = q.optimum().unwrap();
            QuizResponse::Point(corner.x + q.target().tolerance() + 1.0, corner.y)
        }
    }
}

pub fn current_item(practice: &PracticeLoop<QuizItem, FlatPoints>) -> QuizItem {
    practice.session().current_item().cloned().unwrap()
}

mod common;

use practice_core::Shuffler;
use practice_core::model::{FinishReason, QuizItem, QuizResponse};
use practice_core::time::fixed_clock;
use services::catalog::{self, WidgetKind};
use services::Widget;

use common::{correct_response, current_item, wrong_response};

#[test]
fn every_quiz_can_be_played_to_a_perfect_score() {
    for widget in Widget::all().into_iter().filter(|w| w.kind() == WidgetKind::Quiz) {
        let mut practice = catalog::start_quiz(
            widget,
            &widget.default_settings().unwrap(),
            fixed_clock(),
            Shuffler::seeded(42),
        )
        .unwrap();
        practice.start();

        while !practice.is_complete() {
            let index = practice.session().current_index();
            let item = current_item(&practice);
            assert!(practice.select(index, correct_response(&item)).unwrap(), "{widget}");
            practice.reveal().unwrap();
            practice.advance().unwrap();
        }

        let summary = practice.summary().unwrap().expect("summary");
        assert_eq!(summary.reason(), FinishReason::Completed, "{widget}");
        assert_eq!(summary.score(), summary.max_score(), "{widget}");
        assert_eq!(summary.incorrect(), 0, "{widget}");
    }
}

#[test]
fn wrong_answers_score_nothing_and_reset_starts_over() {
    let widget = Widget::DietProblem;
    let mut practice = catalog::start_quiz(
        widget,
        &widget.default_settings().unwrap(),
        fixed_clock(),
        Shuffler::seeded(1),
    )
    .unwrap();
    practice.start();

    let item = current_item(&practice);
    assert!(!practice.select(0, wrong_response(&item)).unwrap());
    // A second answer to the same item is rejected.
    assert!(practice.select(0, correct_response(&item)).is_err());
    assert_eq!(practice.session().score(), 0);

    practice.reset();
    practice.start();
    assert_eq!(practice.session().current_index(), 0);
    assert!(practice.select(0, correct_response(&item)).unwrap());
    assert_eq!(practice.session().score(), 1);
}

#[test]
fn shuffled_widget_is_reproducible_from_its_seed() {
    let widget = Widget::ProblemSizeGame;
    let order = |seed| {
        let mut practice = catalog::start_quiz(
            widget,
            &widget.default_settings().unwrap(),
            fixed_clock(),
            Shuffler::seeded(seed),
        )
        .unwrap();
        practice.start();
        practice
            .session()
            .items()
            .iter()
            .map(|item| practice_core::model::PracticeItem::id(item).value())
            .collect::<Vec<_>>()
    };
    assert_eq!(order(9), order(9));
}

#[test]
fn always_picking_the_first_option_does_not_win() {
    let widget = Widget::FormulaQuiz;
    let mut practice = catalog::start_quiz(
        widget,
        &widget.default_settings().unwrap(),
        fixed_clock(),
        Shuffler::seeded(3),
    )
    .unwrap();
    practice.start();

    while !practice.is_complete() {
        let index = practice.session().current_index();
        let response = match current_item(&practice) {
            QuizItem::Choice(_) => QuizResponse::Choice(0),
            other => correct_response(&other),
        };
        practice.select(index, response).unwrap();
        practice.reveal().unwrap();
        practice.advance().unwrap();
    }

    let summary = practice.summary().unwrap().expect("summary");
    assert_eq!(summary.score(), 0);
    assert!(summary.score() < summary.max_score());
}

//! The course's widgets and the content each one practices.
//!
//! | widget                  | kind   | content                                  |
//! |-------------------------|--------|------------------------------------------|
//! | diet / manufacturing    | quiz   | two-variable LPs solved with `lp2d`      |
//! | transportation          | quiz   | north-west corner rule on a small table  |
//! | formula quiz            | quiz   | gradients, KKT, Newton's method          |
//! | problem-size game       | quiz   | counting variables and basic solutions   |
//! | puzzle game             | quiz   | ordering the steps of an algorithm       |
//! | super-brain game        | quiz   | timed mix of quick questions             |
//! | memory game             | memory | term / definition pairs                  |
//! | gradient descent, rates | demo   | precomputed sequences to step through    |

mod demos;
mod lp;
mod memory;
mod puzzles;
mod quizzes;

use std::fmt;
use std::str::FromStr;

use practice_core::model::{AdvanceGate, QuizItem, SessionSettings, SessionSettingsDraft, SettingsError};
use practice_core::{Clock, MatchingPairs, Shuffler};

use crate::error::{CatalogError, PracticeError};
use crate::sessions::QuizLoop;

pub use demos::{ConvergencePoint, Demo, DEFAULT_PLAYBACK_PERIOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    DietProblem,
    ManufacturingProblem,
    TransportationProblem,
    FormulaQuiz,
    ProblemSizeGame,
    PuzzleGame,
    SuperBrainGame,
    MemoryGame,
    GradientDescentDemo,
    ConvergenceDemo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Quiz,
    Memory,
    Demo,
}

impl Widget {
    #[must_use]
    pub fn all() -> [Widget; 10] {
        [
            Widget::DietProblem,
            Widget::ManufacturingProblem,
            Widget::TransportationProblem,
            Widget::FormulaQuiz,
            Widget::ProblemSizeGame,
            Widget::PuzzleGame,
            Widget::SuperBrainGame,
            Widget::MemoryGame,
            Widget::GradientDescentDemo,
            Widget::ConvergenceDemo,
        ]
    }

    /// Identifier used on the command line and in config files.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Widget::DietProblem => "diet",
            Widget::ManufacturingProblem => "manufacturing",
            Widget::TransportationProblem => "transportation",
            Widget::FormulaQuiz => "formula-quiz",
            Widget::ProblemSizeGame => "problem-size",
            Widget::PuzzleGame => "puzzle",
            Widget::SuperBrainGame => "super-brain",
            Widget::MemoryGame => "memory",
            Widget::GradientDescentDemo => "gradient-descent",
            Widget::ConvergenceDemo => "convergence",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Widget::DietProblem => "Diet Problem",
            Widget::ManufacturingProblem => "Manufacturing Problem",
            Widget::TransportationProblem => "Transportation Problem",
            Widget::FormulaQuiz => "Formula Quiz",
            Widget::ProblemSizeGame => "Problem Size Game",
            Widget::PuzzleGame => "Puzzle Game",
            Widget::SuperBrainGame => "Super Brain Game",
            Widget::MemoryGame => "Memory Game",
            Widget::GradientDescentDemo => "Gradient Descent",
            Widget::ConvergenceDemo => "Rates of Convergence",
        }
    }

    #[must_use]
    pub fn kind(self) -> WidgetKind {
        match self {
            Widget::MemoryGame => WidgetKind::Memory,
            Widget::GradientDescentDemo | Widget::ConvergenceDemo => WidgetKind::Demo,
            _ => WidgetKind::Quiz,
        }
    }

    /// Settings the widget uses unless configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a widget's built-in values are out of range.
    pub fn default_settings(self) -> Result<SessionSettings, SettingsError> {
        let draft = SessionSettings::default().to_draft();
        let draft = match self {
            Widget::ProblemSizeGame => SessionSettingsDraft {
                gate: AdvanceGate::RequireAnswer,
                shuffle: true,
                ..draft
            },
            Widget::SuperBrainGame => SessionSettingsDraft {
                gate: AdvanceGate::RequireAnswer,
                shuffle: true,
                time_limit_secs: Some(quizzes::SUPER_BRAIN_SECONDS),
                ..draft
            },
            Widget::MemoryGame => SessionSettingsDraft {
                shuffle: true,
                ..draft
            },
            _ => draft,
        };
        draft.validate()
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Widget {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Widget::all()
            .into_iter()
            .find(|widget| widget.slug() == wanted)
            .ok_or_else(|| CatalogError::UnknownWidget(s.trim().to_string()))
    }
}

/// Item bank of a quiz widget, in presentation order.
///
/// # Errors
///
/// Returns `CatalogError::NotAQuiz` for memory games and demos, or the
/// underlying error if a bank fails to build.
pub fn quiz_items(widget: Widget) -> Result<Vec<QuizItem>, PracticeError> {
    match widget {
        Widget::DietProblem => lp::diet_items(),
        Widget::ManufacturingProblem => lp::manufacturing_items(),
        Widget::TransportationProblem => lp::transportation_items(),
        Widget::FormulaQuiz => quizzes::formula_items(),
        Widget::ProblemSizeGame => quizzes::problem_size_items(),
        Widget::PuzzleGame => puzzles::puzzle_items(),
        Widget::SuperBrainGame => quizzes::super_brain_items(),
        Widget::MemoryGame | Widget::GradientDescentDemo | Widget::ConvergenceDemo => {
            Err(CatalogError::NotAQuiz(widget).into())
        }
    }
}

/// Practice loop for a quiz widget; `shuffler` is used when `settings`
/// ask for shuffling.
///
/// # Errors
///
/// See [`quiz_items`].
pub fn start_quiz(
    widget: Widget,
    settings: &SessionSettings,
    clock: Clock,
    mut shuffler: Shuffler,
) -> Result<QuizLoop, PracticeError> {
    let mut items = quiz_items(widget)?;
    if settings.shuffle() {
        shuffle_presentation(&mut items, &mut shuffler);
    }
    QuizLoop::from_settings(widget.title(), clock, items, settings, shuffler)
}

/// Shuffle the options of every choice question and the displayed steps of
/// every ordering puzzle.
fn shuffle_presentation(items: &mut [QuizItem], shuffler: &mut Shuffler) {
    for item in items {
        match item {
            QuizItem::Choice(question) => {
                *question = question.clone().with_shuffled_options(shuffler);
            }
            QuizItem::Ordering(puzzle) => {
                *puzzle = puzzle.clone().with_shuffled_display(shuffler);
            }
            QuizItem::Numeric(_) | QuizItem::Corner(_) => {}
        }
    }
}

/// Board of the memory game, shuffled when a shuffler is given.
///
/// # Errors
///
/// Returns `CatalogError::NotAMemoryGame` for other widgets.
pub fn memory_board(widget: Widget, shuffler: Option<Shuffler>) -> Result<MatchingPairs, PracticeError> {
    if widget != Widget::MemoryGame {
        return Err(CatalogError::NotAMemoryGame(widget).into());
    }
    let board = memory::board()?;
    Ok(match shuffler {
        Some(shuffler) => board.with_shuffler(shuffler),
        None => board,
    })
}

/// Step-through sequence of a demo widget.
///
/// # Errors
///
/// Returns `CatalogError::NotADemo` for other widgets.
pub fn demo(widget: Widget) -> Result<Demo, PracticeError> {
    let demo = match widget {
        Widget::GradientDescentDemo => demos::gradient_descent(),
        Widget::ConvergenceDemo => demos::convergence(),
        _ => return Err(CatalogError::NotADemo(widget).into()),
    };
    demo.ok_or_else(|| CatalogError::EmptyDemo(widget).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::PracticeItem;
    use practice_core::time::fixed_clock;
    use std::collections::HashSet;

    #[test]
    fn slugs_round_trip_and_are_unique() {
        let slugs: HashSet<_> = Widget::all().iter().map(|w| w.slug()).collect();
        assert_eq!(slugs.len(), Widget::all().len());
        for widget in Widget::all() {
            assert_eq!(widget.slug().parse::<Widget>().unwrap(), widget);
        }
        assert_eq!(" Super_Brain ".parse::<Widget>().unwrap(), Widget::SuperBrainGame);
    }

    #[test]
    fn unknown_widget_is_reported() {
        assert_eq!(
            "sudoku".parse::<Widget>().unwrap_err(),
            CatalogError::UnknownWidget("sudoku".into())
        );
    }

    #[test]
    fn every_quiz_has_a_valid_bank() {
        for widget in Widget::all().into_iter().filter(|w| w.kind() == WidgetKind::Quiz) {
            let items = quiz_items(widget).unwrap();
            assert!(!items.is_empty(), "{widget} has no items");
            let ids: HashSet<_> = items.iter().map(PracticeItem::id).collect();
            assert_eq!(ids.len(), items.len(), "{widget} repeats item ids");
        }
    }

    #[test]
    fn non_quiz_widgets_are_rejected() {
        assert!(matches!(
            quiz_items(Widget::MemoryGame),
            Err(PracticeError::Catalog(CatalogError::NotAQuiz(Widget::MemoryGame)))
        ));
        assert!(matches!(
            memory_board(Widget::DietProblem, None),
            Err(PracticeError::Catalog(CatalogError::NotAMemoryGame(_)))
        ));
        assert!(matches!(
            demo(Widget::PuzzleGame),
            Err(PracticeError::Catalog(CatalogError::NotADemo(_)))
        ));
    }

    #[test]
    fn only_super_brain_is_timed() {
        for widget in Widget::all() {
            let timed = widget.default_settings().unwrap().time_limit_secs().is_some();
            assert_eq!(timed, widget == Widget::SuperBrainGame, "{widget}");
        }
    }

    #[test]
    fn super_brain_defaults_are_timed_and_shuffled() {
        let settings = Widget::SuperBrainGame.default_settings().unwrap();
        assert_eq!(settings.time_limit_secs(), Some(quizzes::SUPER_BRAIN_SECONDS));
        assert!(settings.shuffle());
        assert_eq!(settings.gate(), AdvanceGate::RequireAnswer);
    }

    #[test]
    fn correct_answers_are_spread_over_the_options() {
        let choices: Vec<_> = Widget::all()
            .into_iter()
            .filter(|w| w.kind() == WidgetKind::Quiz)
            .flat_map(|w| quiz_items(w).unwrap())
            .filter_map(|item| match item {
                QuizItem::Choice(q) => Some(q),
                _ => None,
            })
            .collect();
        let first_is_right = choices
            .iter()
            .filter(|q| q.correct_options().contains(&0))
            .count();
        assert!(
            first_is_right * 4 <= choices.len(),
            "{first_is_right} of {} choice questions accept the first option",
            choices.len()
        );
    }

    #[test]
    fn shuffled_presentation_moves_options_but_not_answers() {
        let original = quiz_items(Widget::FormulaQuiz).unwrap();
        let mut shuffled = original.clone();
        shuffle_presentation(&mut shuffled, &mut Shuffler::seeded(8));

        let accepted = |item: &QuizItem| match item {
            QuizItem::Choice(q) => {
                let mut texts: Vec<String> =
                    q.correct_options().iter().map(|&i| q.options()[i].clone()).collect();
                texts.sort();
                texts
            }
            _ => Vec::new(),
        };
        let mut moved = 0;
        for (before, after) in original.iter().zip(&shuffled) {
            assert_eq!(accepted(before), accepted(after));
            if before != after {
                moved += 1;
            }
        }
        assert!(moved > 0, "no question had its options reordered");
    }

    #[test]
    fn start_quiz_uses_widget_title() {
        let widget = Widget::ManufacturingProblem;
        let practice = start_quiz(
            widget,
            &widget.default_settings().unwrap(),
            fixed_clock(),
            Shuffler::seeded(5),
        )
        .unwrap();
        assert_eq!(practice.title(), "Manufacturing Problem");
        assert!(!practice.is_started());
    }
}

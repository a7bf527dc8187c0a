//! Presentation-agnostic view-models.
//!
//! These carry no pre-formatted strings beyond the item text itself; a
//! presentation layer decides how to render them and uses the `can_*` flags
//! to disable controls instead of sending rejected actions.

use serde::Serialize;

use practice_core::demos::Playback;
use practice_core::model::{
    AnswerStage, CardId, ChoiceQuestion, CornerQuestion, FinishReason, NumericQuestion,
    OrderingPuzzle, PracticeItem, QuizItem, ScoringRule,
};
use practice_core::pairs::CardFace;
use practice_core::MatchingPairs;

use super::workflow::PracticeLoop;

/// Kind-specific part of the current item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemBody {
    Choice { options: Vec<String> },
    Numeric { unit: Option<String> },
    /// Steps in display order; answers pick displayed positions.
    Ordering { steps: Vec<String> },
    /// Answer is an `(x, y)` point on the graphical-method canvas.
    Corner { constraints: Vec<String>, tolerance: f64 },
}

/// Items that know how to present their answer controls.
pub trait DescribeItem {
    fn body(&self) -> ItemBody;
}

impl DescribeItem for ChoiceQuestion {
    fn body(&self) -> ItemBody {
        ItemBody::Choice {
            options: self.options().to_vec(),
        }
    }
}

impl DescribeItem for NumericQuestion {
    fn body(&self) -> ItemBody {
        ItemBody::Numeric {
            unit: self.unit().map(str::to_owned),
        }
    }
}

impl DescribeItem for OrderingPuzzle {
    fn body(&self) -> ItemBody {
        ItemBody::Ordering {
            steps: self.displayed_steps().map(str::to_owned).collect(),
        }
    }
}

impl DescribeItem for CornerQuestion {
    fn body(&self) -> ItemBody {
        let target = self.target();
        ItemBody::Corner {
            constraints: target
                .program()
                .constraints
                .iter()
                .map(|c| c.label.clone())
                .collect(),
            tolerance: target.tolerance(),
        }
    }
}

impl DescribeItem for QuizItem {
    fn body(&self) -> ItemBody {
        match self {
            QuizItem::Choice(q) => q.body(),
            QuizItem::Numeric(q) => q.body(),
            QuizItem::Ordering(q) => q.body(),
            QuizItem::Corner(q) => q.body(),
        }
    }
}

//
// ─── PRACTICE SESSION ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub title: String,
    /// Zero-based; equals `total` once complete.
    pub position: usize,
    pub total: usize,
    pub prompt: Option<String>,
    pub body: Option<ItemBody>,
    pub stage: AnswerStage,
    pub last_answer_correct: Option<bool>,
    pub explanation: Option<String>,
    pub score: u32,
    pub max_score: u32,
    pub time_remaining: Option<u32>,
    pub started: bool,
    pub completed: bool,
    pub finish_reason: Option<FinishReason>,
    pub can_select: bool,
    pub can_reveal: bool,
    pub can_advance: bool,
}

impl SessionView {
    #[must_use]
    pub fn of<I, S>(practice: &PracticeLoop<I, S>) -> Self
    where
        I: PracticeItem + DescribeItem,
        S: ScoringRule,
    {
        let session = practice.session();
        let running = practice.is_running();
        let item = session.current_item();
        let answer = session.answer_state();
        Self {
            title: practice.title().to_owned(),
            position: session.current_index(),
            total: session.len(),
            prompt: item.map(|item| item.prompt().to_owned()),
            body: item.map(DescribeItem::body),
            stage: answer.stage(),
            last_answer_correct: answer.is_correct(),
            explanation: session.explanation().map(str::to_owned),
            score: session.score(),
            max_score: session.max_score(),
            time_remaining: practice.game().time_remaining(),
            started: practice.is_started(),
            completed: session.is_complete(),
            finish_reason: session.finish_reason(),
            can_select: running && session.can_select(),
            can_reveal: running && session.can_reveal(),
            can_advance: running && session.can_advance(),
        }
    }
}

impl<I, S> PracticeLoop<I, S>
where
    I: PracticeItem + DescribeItem,
    S: ScoringRule,
{
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::of(self)
    }
}

//
// ─── MEMORY BOARD ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub face: CardFace,
    /// Hidden cards do not expose their label.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryBoardView {
    pub cards: Vec<CardView>,
    pub score: u32,
    pub max_score: u32,
    pub moves: u32,
    pub awaiting_flip_back: bool,
    pub completed: bool,
}

impl MemoryBoardView {
    #[must_use]
    pub fn of(game: &MatchingPairs) -> Self {
        let cards = game
            .cards()
            .iter()
            .zip(game.faces())
            .map(|(card, face)| CardView {
                id: card.id(),
                face: *face,
                label: (*face != CardFace::Hidden).then(|| card.label().to_owned()),
            })
            .collect();
        Self {
            cards,
            score: game.score(),
            max_score: game.max_score(),
            moves: game.moves(),
            awaiting_flip_back: game.pending_flip_back().is_some(),
            completed: game.is_complete(),
        }
    }
}

//
// ─── PLAYBACK ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackView<T> {
    pub index: usize,
    pub len: usize,
    pub current: T,
    pub playing: bool,
    pub at_start: bool,
    pub at_end: bool,
}

impl<T: Clone> PlaybackView<T> {
    #[must_use]
    pub fn of(playback: &Playback<T>) -> Self {
        let cursor = playback.cursor();
        Self {
            index: cursor.index(),
            len: cursor.len(),
            current: cursor.current().clone(),
            playing: playback.is_playing(),
            at_start: cursor.is_at_start(),
            at_end: cursor.is_at_end(),
        }
    }
}

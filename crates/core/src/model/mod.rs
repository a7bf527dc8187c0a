mod answer;
mod ids;
mod item;
mod scoring;
mod settings;
mod summary;

pub use answer::{AnswerStage, AnswerState, ItemOutcome};
pub use ids::{CardId, ItemId};
pub use item::{
    ChoiceQuestion, CornerQuestion, ItemError, NumericQuestion, OrderingPuzzle, PracticeItem,
    QuizItem, QuizResponse,
};
pub use scoring::{FlatPoints, ItemPoints, ScoringRule};
pub use settings::{AdvanceGate, SessionSettings, SessionSettingsDraft, SettingsError};
pub use summary::{FinishReason, SessionSummary, SessionSummaryError};

//! Plain-text rendering of the view-models.

use std::fmt::Write;

use practice_core::demos::DescentStep;
use practice_core::model::{AnswerStage, FinishReason, SessionSummary};
use practice_core::pairs::CardFace;
use services::catalog::ConvergencePoint;
use services::{ItemBody, MemoryBoardView, PlaybackView, SessionView};

pub fn session(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = write!(out, "[{}] score {}/{}", view.title, view.score, view.max_score);
    if let Some(secs) = view.time_remaining {
        let _ = write!(out, "  time {secs}s");
    }
    out.push('\n');

    if !view.started {
        out.push_str("Type `start` to begin.\n");
        return out;
    }
    if view.completed {
        let reason = match view.finish_reason {
            Some(FinishReason::TimedOut) => "Time is up!",
            _ => "All done!",
        };
        let _ = writeln!(out, "{reason} Type `start` to play again.");
        return out;
    }

    let _ = writeln!(out, "Q{}/{}: {}", view.position + 1, view.total, view.prompt.as_deref().unwrap_or(""));
    match &view.body {
        Some(ItemBody::Choice { options }) => {
            for (idx, option) in options.iter().enumerate() {
                let _ = writeln!(out, "  {}) {option}", idx + 1);
            }
        }
        Some(ItemBody::Numeric { unit }) => {
            let _ = writeln!(out, "  answer with a number{}", unit.as_deref().map(|u| format!(" ({u})")).unwrap_or_default());
        }
        Some(ItemBody::Ordering { steps }) => {
            for (idx, step) in steps.iter().enumerate() {
                let _ = writeln!(out, "  {}) {step}", idx + 1);
            }
            out.push_str("  answer with the numbers in the right order\n");
        }
        Some(ItemBody::Corner { constraints, tolerance }) => {
            let _ = writeln!(out, "  constraints: {}", constraints.join(", "));
            let _ = writeln!(out, "  answer with the corner as `x y` (within {tolerance})");
        }
        None => {}
    }

    match (view.stage, view.last_answer_correct) {
        (AnswerStage::Unanswered, _) => {}
        (_, Some(true)) => out.push_str("Correct.\n"),
        (_, _) => out.push_str("Not quite.\n"),
    }
    if let Some(explanation) = &view.explanation {
        let _ = writeln!(out, "  {explanation}");
    }
    out
}

pub fn summary(summary: &SessionSummary) -> String {
    format!(
        "score {}/{}: {} correct, {} incorrect, {} skipped in {}s",
        summary.score(),
        summary.max_score(),
        summary.correct(),
        summary.incorrect(),
        summary.skipped(),
        summary.duration_secs()
    )
}

pub fn board(view: &MemoryBoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "pairs {}/{}  moves {}", view.score, view.max_score, view.moves);
    for (idx, card) in view.cards.iter().enumerate() {
        let shown = match (card.face, card.label.as_deref()) {
            (CardFace::Hidden, _) | (_, None) => "??".to_string(),
            (CardFace::FaceUp, Some(label)) => format!("[{label}]"),
            (CardFace::Matched, Some(label)) => format!("({label})"),
        };
        let _ = writeln!(out, "  {:>2}) {shown}", idx + 1);
    }
    if view.completed {
        out.push_str("Board cleared! Type `reset` to play again.\n");
    }
    out
}

pub fn descent(view: &PlaybackView<DescentStep>) -> String {
    let step = &view.current;
    format!(
        "step {}/{}{}  x = {:.4}  y = {:.4}  f = {:.6}  |grad| = {:.6}",
        view.index + 1,
        view.len,
        if view.playing { " \u{25b6}" } else { "" },
        step.x,
        step.y,
        step.value,
        step.gradient_norm
    )
}

pub fn convergence(view: &PlaybackView<ConvergencePoint>) -> String {
    let point = &view.current;
    format!(
        "k = {}{}  linear {:.3e}  superlinear {:.3e}  quadratic {:.3e}",
        point.iteration,
        if view.playing { " \u{25b6}" } else { "" },
        point.linear,
        point.superlinear,
        point.quadratic
    )
}

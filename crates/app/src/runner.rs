//! Interactive terminal loop driving one widget from stdin.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};

use practice_core::demos::Playback;
use practice_core::model::{
    FlatPoints, NumericQuestion, OrderingPuzzle, QuizItem, QuizResponse, SessionSettings,
};
use practice_core::{Advance, Clock, Shuffler};
use services::catalog::{self, Demo, DEFAULT_PLAYBACK_PERIOD, WidgetKind};
use services::{LiveMemoryGame, LivePlayback, LiveSession, PlaybackView, Widget};

use crate::render;

const POLL_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn show<T: Serialize>(self, view: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(view)?);
        } else {
            println!("{}", text(view));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NotAnOption { max: usize },
    BadOrder,
    BadPoint,
    NoCurrentItem,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotAnOption { max } => write!(f, "pick an option between 1 and {max}"),
            InputError::BadOrder => write!(f, "list step numbers separated by spaces"),
            InputError::BadPoint => write!(f, "give the corner as two numbers, e.g. `2 6`"),
            InputError::NoCurrentItem => write!(f, "nothing to answer right now"),
        }
    }
}

impl std::error::Error for InputError {}

/// Turn a typed answer into a response for `item`.
///
/// Numeric input never fails: malformed numbers count as `0`.
pub fn parse_answer(item: &QuizItem, raw: &str) -> Result<QuizResponse, InputError> {
    match item {
        QuizItem::Choice(q) => {
            let max = q.options().len();
            raw.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=max).contains(n))
                .map(|n| QuizResponse::Choice(n - 1))
                .ok_or(InputError::NotAnOption { max })
        }
        QuizItem::Numeric(_) => Ok(QuizResponse::Number(NumericQuestion::parse_response(raw))),
        QuizItem::Ordering(puzzle) => parse_order(puzzle, raw).map(QuizResponse::Order),
        QuizItem::Corner(_) => parse_point(raw),
    }
}

fn parse_point(raw: &str) -> Result<QuizResponse, InputError> {
    let coords = raw
        .split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().map_err(|_| InputError::BadPoint))
        .collect::<Result<Vec<_>, _>>()?;
    match coords[..] {
        [x, y] => Ok(QuizResponse::Point(x, y)),
        _ => Err(InputError::BadPoint),
    }
}

fn parse_order(puzzle: &OrderingPuzzle, raw: &str) -> Result<Vec<usize>, InputError> {
    let picks = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(InputError::BadOrder),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if picks.is_empty() {
        return Err(InputError::BadOrder);
    }
    Ok(puzzle.response_from_display(&picks))
}

pub async fn run(
    widget: Widget,
    settings: SessionSettings,
    shuffler: Shuffler,
    output: Output,
) -> Result<()> {
    match widget.kind() {
        WidgetKind::Quiz => run_quiz(widget, &settings, shuffler, output).await,
        WidgetKind::Memory => run_memory(widget, &settings, shuffler, output).await,
        WidgetKind::Demo => match catalog::demo(widget)? {
            Demo::Descent(playback) => run_playback(playback, render::descent, output).await,
            Demo::Convergence(playback) => {
                run_playback(playback, render::convergence, output).await
            }
        },
    }
}

/// One interactive widget: typed commands plus redraws for changes made by
/// its timers.
trait Screen {
    fn on_line(&mut self, line: &str) -> Result<Flow>;

    /// Called every poll period; redraw when a timer changed something.
    fn on_poll(&mut self) -> Result<()>;
}

async fn drive(screen: &mut impl Screen) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = time::interval(POLL_PERIOD);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if screen.on_line(line.trim())? == Flow::Quit {
                    break;
                }
            }
            _ = poll.tick() => screen.on_poll()?,
        }
    }
    Ok(())
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

struct QuizScreen {
    live: LiveSession<QuizItem, FlatPoints>,
    output: Output,
    shown_complete: bool,
}

async fn run_quiz(
    widget: Widget,
    settings: &SessionSettings,
    shuffler: Shuffler,
    output: Output,
) -> Result<()> {
    let practice = catalog::start_quiz(widget, settings, Clock::default(), shuffler)?;
    let mut screen = QuizScreen {
        live: LiveSession::new(practice),
        output,
        shown_complete: false,
    };
    println!("commands: start, <answer>, reveal, next, reset, quit");
    output.show(&screen.live.view(), render::session)?;
    drive(&mut screen).await
}

impl QuizScreen {
    fn answer(&mut self, raw: &str) {
        let current = self.live.with(|p| {
            let session = p.session();
            session
                .current_item()
                .cloned()
                .map(|item| (session.current_index(), item))
        });
        let parsed = current
            .ok_or(InputError::NoCurrentItem)
            .and_then(|(index, item)| parse_answer(&item, raw).map(|r| (index, r)));
        match parsed {
            Ok((index, response)) => {
                if let Err(err) = self.live.select(index, response) {
                    println!("{err}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    fn print_summary(&self) {
        match self.live.summary() {
            Ok(Some(summary)) => println!("{}", render::summary(&summary)),
            Ok(None) => {}
            Err(err) => println!("{err}"),
        }
    }
}

impl Screen for QuizScreen {
    fn on_line(&mut self, line: &str) -> Result<Flow> {
        match line {
            "" => {}
            "quit" | "q" => return Ok(Flow::Quit),
            "start" | "s" => self.live.start()?,
            "reset" => self.live.reset(),
            "reveal" | "r" => {
                if let Err(err) = self.live.reveal() {
                    println!("{err}");
                }
            }
            "next" | "n" => match self.live.advance() {
                Ok(Advance::Completed) => self.print_summary(),
                Ok(Advance::Next(_)) => {}
                Err(err) => println!("{err}"),
            },
            answer => self.answer(answer),
        }
        self.shown_complete = self.live.with(|p| p.is_complete());
        self.output.show(&self.live.view(), render::session)?;
        Ok(Flow::Continue)
    }

    fn on_poll(&mut self) -> Result<()> {
        let complete = self.live.with(|p| p.is_complete());
        if complete && !self.shown_complete {
            self.shown_complete = true;
            self.output.show(&self.live.view(), render::session)?;
            self.print_summary();
        }
        Ok(())
    }
}

//
// ─── MEMORY GAME ───────────────────────────────────────────────────────────────
//

struct MemoryScreen {
    game: LiveMemoryGame,
    output: Output,
    awaiting_flip_back: bool,
}

async fn run_memory(
    widget: Widget,
    settings: &SessionSettings,
    shuffler: Shuffler,
    output: Output,
) -> Result<()> {
    let shuffler = settings.shuffle().then_some(shuffler);
    let board = catalog::memory_board(widget, shuffler)?;
    let mut screen = MemoryScreen {
        game: LiveMemoryGame::from_settings(widget.title(), board, settings),
        output,
        awaiting_flip_back: false,
    };
    println!("commands: <card number>, reset, quit");
    output.show(&screen.game.view(), render::board)?;
    drive(&mut screen).await
}

impl Screen for MemoryScreen {
    fn on_line(&mut self, line: &str) -> Result<Flow> {
        match line {
            "" => {}
            "quit" | "q" => return Ok(Flow::Quit),
            "reset" => self.game.reset(),
            pick => match pick.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    self.game.select_at(n - 1)?;
                }
                _ => println!("type a card number"),
            },
        }
        let view = self.game.view();
        self.awaiting_flip_back = view.awaiting_flip_back;
        self.output.show(&view, render::board)?;
        Ok(Flow::Continue)
    }

    fn on_poll(&mut self) -> Result<()> {
        let view = self.game.view();
        if self.awaiting_flip_back && !view.awaiting_flip_back {
            self.awaiting_flip_back = false;
            self.output.show(&view, render::board)?;
        }
        Ok(())
    }
}

//
// ─── DEMOS ─────────────────────────────────────────────────────────────────────
//

struct PlaybackScreen<T> {
    live: LivePlayback<T>,
    text: fn(&PlaybackView<T>) -> String,
    output: Output,
    last: PlaybackView<T>,
}

async fn run_playback<T>(
    playback: Playback<T>,
    text: fn(&PlaybackView<T>) -> String,
    output: Output,
) -> Result<()>
where
    T: Clone + PartialEq + Serialize + Send + 'static,
{
    let live = LivePlayback::new(playback, DEFAULT_PLAYBACK_PERIOD);
    let last = live.view();
    println!("commands: play (p), forward (f), back (b), reset, quit");
    output.show(&last, text)?;
    let mut screen = PlaybackScreen {
        live,
        text,
        output,
        last,
    };
    drive(&mut screen).await
}

impl<T> Screen for PlaybackScreen<T>
where
    T: Clone + PartialEq + Serialize + Send + 'static,
{
    fn on_line(&mut self, line: &str) -> Result<Flow> {
        match line {
            "" => {}
            "quit" | "q" => return Ok(Flow::Quit),
            "play" | "pause" | "p" => {
                self.live.toggle()?;
            }
            "forward" | "f" => {
                self.live.step_forward();
            }
            "back" | "b" => {
                self.live.step_back();
            }
            "reset" => self.live.reset(),
            _ => println!("unknown command"),
        }
        self.last = self.live.view();
        self.output.show(&self.last, self.text)?;
        Ok(Flow::Continue)
    }

    fn on_poll(&mut self) -> Result<()> {
        let view = self.live.view();
        if view != self.last {
            self.output.show(&view, self.text)?;
            self.last = view;
        }
        Ok(())
    }
}

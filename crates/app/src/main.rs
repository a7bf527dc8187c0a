mod config;
mod render;
mod runner;

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use practice_core::Shuffler;
use services::Widget;

use crate::runner::Output;

const LOG_ENV: &str = "PRACTICE_LOG";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidWidget { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidWidget { raw } => {
                write!(f, "unknown widget: {raw} (see --list)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    widget: Option<Widget>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    list: bool,
    json: bool,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--widget" | "-w" => {
                    let value = require_value(args, "--widget")?;
                    let widget = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidWidget { raw: value.clone() })?;
                    parsed.widget = Some(widget);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--config" => {
                    parsed.config = Some(PathBuf::from(require_value(args, "--config")?));
                }
                "--list" => parsed.list = true,
                "--json" => parsed.json = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  practice --widget <slug> [--seed <n>] [--config <path>] [--json]");
    eprintln!("  practice --list");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}  config file (default ./practice.toml)", config::CONFIG_ENV);
    eprintln!("  {LOG_ENV}  log filter, e.g. `debug` or `services=info` (default warn)");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let args = Args::parse(&mut std::env::args().skip(1)).map_err(|e| {
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }
    if args.list {
        for widget in Widget::all() {
            println!("{:<18} {}", widget.slug(), widget.title());
        }
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref())?;
    let widget = match args.widget {
        Some(widget) => widget,
        None => match config.widget().context("invalid widget in config")? {
            Some(widget) => widget,
            None => bail!("no widget selected; pass --widget <slug> or see --list"),
        },
    };
    let settings = config
        .session
        .apply(widget.default_settings()?)
        .context("invalid [session] settings")?;
    let shuffler = args
        .seed
        .or(config.seed)
        .map_or_else(Shuffler::from_entropy, Shuffler::seeded);

    tracing::info!(%widget, seed = ?shuffler.seed(), "launching widget");
    runner::run(widget, settings, shuffler, Output { json: args.json }).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}

//! The `quizclock play` command (also the default).

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizclock_core::config::{load_config_from, QuizConfig};
use quizclock_core::duration::parse_duration;
use quizclock_core::engine::{SessionEngine, Termination};
use quizclock_core::loader::load_questions;
use quizclock_core::terminal::StdTerminal;
use quizclock_report::json::render_json;
use quizclock_report::render_text;

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// CSV file of question,answer records [default: problems.csv]
    #[arg(long, short = 'f', alias = "filepath")]
    pub file: Option<PathBuf>,

    /// Shuffle the questions
    #[arg(long)]
    pub shuffle: bool,

    /// Number of questions to ask; 0 or more than available asks all
    #[arg(long, short = 'n', alias = "totalquestions")]
    pub total_questions: Option<usize>,

    /// Time limit for the whole quiz, e.g. 30s, 1m30s [default: 30s]
    #[arg(long, short = 't', alias = "timelimit", value_parser = parse_time_limit)]
    pub time_limit: Option<Duration>,

    /// Seed for the shuffle, for a reproducible question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    pub format: String,
}

fn parse_time_limit(s: &str) -> Result<Duration, String> {
    let limit = parse_duration(s).map_err(|e| e.to_string())?;
    if limit.is_zero() {
        return Err("time limit must be greater than zero".into());
    }
    Ok(limit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
        }
    }
}

/// Layer command-line flags over the loaded configuration.
fn resolve(mut config: QuizConfig, args: &PlayArgs) -> QuizConfig {
    if let Some(file) = &args.file {
        config.file_path = file.clone();
    }
    if args.shuffle {
        config.shuffle = true;
    }
    if let Some(n) = args.total_questions {
        config.total_questions = n;
    }
    if let Some(limit) = args.time_limit {
        config.time_limit = limit;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}

pub async fn execute(args: PlayArgs) -> Result<Termination> {
    let format = OutputFormat::parse(&args.format)?;
    let settings = resolve(load_config_from(args.config.as_deref())?, &args);
    anyhow::ensure!(
        !settings.time_limit.is_zero(),
        "time limit must be greater than zero"
    );
    tracing::debug!(?settings, "resolved settings");

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let questions = load_questions(
        &settings.file_path,
        settings.total_questions,
        settings.shuffle,
        &mut rng,
    )?;

    let mut engine = SessionEngine::new(StdTerminal::new());
    let name = engine.greet().await?;
    let outcome = engine
        .run_session(&questions, settings.time_limit, &name)
        .await?;

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => writeln!(stdout, "{}", render_text(&outcome.result))?,
        OutputFormat::Json => writeln!(stdout, "{}", render_json(&outcome.result)?)?,
    }
    stdout.flush()?;

    Ok(outcome.termination)
}

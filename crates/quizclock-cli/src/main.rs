//! quizclock CLI — play, validate, and scaffold timed quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quizclock_core::engine::Termination;
use quizclock_core::error::{ErrorKind, QuizError};

mod commands;

use commands::play::PlayArgs;

#[derive(Parser)]
#[command(
    name = "quizclock",
    version,
    about = "Timed terminal quiz game",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed quiz (the default when no subcommand is given)
    Play(PlayArgs),

    /// Check a question bank for problems
    Validate {
        /// CSV file of question,answer records
        #[arg(long, short = 'f', alias = "filepath", default_value = "problems.csv")]
        file: PathBuf,
    },

    /// Create a starter question bank and config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Play(cli.play)) {
        Commands::Play(args) => match commands::play::execute(args).await {
            // The abandoned stdin read would otherwise hold the runtime open.
            Ok(Termination::TimeoutExpired) => process::exit(0),
            other => other.map(|_| ()),
        },
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        if let Some(hint) = hint(&e) {
            eprintln!("hint: {hint}");
        }
        process::exit(1);
    }
}

fn hint(error: &anyhow::Error) -> Option<&'static str> {
    let kind = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<QuizError>())
        .map(QuizError::kind)?;
    match kind {
        ErrorKind::Configuration => {
            Some("check the question bank with `quizclock validate --file <path>`")
        }
        ErrorKind::InputStream => Some("answers are read from stdin, which closed before the quiz ended"),
        ErrorKind::Usage => None,
    }
}

//! Quiz configuration.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! config file, `QUIZCLOCK_*` environment variables, and command-line flags
//! (applied by the CLI on top of what this module returns).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::duration::{self, parse_duration};

/// Top-level quizclock configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV file with `question,answer` records.
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
    /// Shuffle question order.
    #[serde(default)]
    pub shuffle: bool,
    /// Number of questions to ask; 0 means all.
    #[serde(default)]
    pub total_questions: usize,
    /// Time allowed for the whole session, e.g. `"30s"`.
    #[serde(default = "default_time_limit", with = "duration::as_text")]
    pub time_limit: Duration,
    /// Seed for the shuffle; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_file_path() -> PathBuf {
    PathBuf::from("problems.csv")
}

fn default_time_limit() -> Duration {
    Duration::from_secs(30)
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            shuffle: false,
            total_questions: 0,
            time_limit: default_time_limit(),
            seed: None,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
///
/// Environment variable overrides: `QUIZCLOCK_FILE`, `QUIZCLOCK_TIME_LIMIT`,
/// `QUIZCLOCK_SHUFFLE`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Parse a TOML config document.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

/// Apply `QUIZCLOCK_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(mut config: QuizConfig, lookup: F) -> Result<QuizConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(file) = lookup("QUIZCLOCK_FILE") {
        config.file_path = PathBuf::from(file);
    }

    if let Some(limit) = lookup("QUIZCLOCK_TIME_LIMIT") {
        config.time_limit =
            parse_duration(&limit).context("invalid QUIZCLOCK_TIME_LIMIT")?;
    }

    if let Some(shuffle) = lookup("QUIZCLOCK_SHUFFLE") {
        config.shuffle = match shuffle.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            other => anyhow::bail!("invalid QUIZCLOCK_SHUFFLE: '{other}'"),
        };
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}

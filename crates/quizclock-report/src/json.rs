//! JSON rendering for scripting.

use anyhow::{Context, Result};
use serde::Serialize;

use quizclock_core::model::SessionResult;
use quizclock_core::report::{score, ScoreReport};

#[derive(Serialize)]
struct JsonSummary<'a> {
    score: ScoreReport,
    result: &'a SessionResult,
}

/// Render the score and the full result as pretty-printed JSON.
pub fn render_json(result: &SessionResult) -> Result<String> {
    let summary = JsonSummary {
        score: score(result),
        result,
    };
    serde_json::to_string_pretty(&summary).context("failed to serialize session result")
}

//! Scoring of a finished session.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration;
use crate::model::SessionResult;

/// Timing part of a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimeSummary {
    /// All questions answered; how long it took and what was left.
    Completed {
        #[serde(with = "duration::as_secs_f64")]
        elapsed: Duration,
        #[serde(with = "duration::as_secs_f64")]
        remaining: Duration,
    },
    /// The clock ran out.
    TimedOut {
        #[serde(with = "duration::as_secs_f64")]
        elapsed: Duration,
        #[serde(with = "duration::as_secs_f64")]
        time_limit: Duration,
    },
}

/// Score derived from a [`SessionResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub user_name: String,
    pub total_questions: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// `correct / total_questions * 100`; unanswered questions count against it.
    pub percent_correct: f64,
    pub time: TimeSummary,
}

/// Score a finished session. Pure; `result` is not modified.
pub fn score(result: &SessionResult) -> ScoreReport {
    let percent_correct = if result.total_questions == 0 {
        0.0
    } else {
        result.correct_count as f64 / result.total_questions as f64 * 100.0
    };

    let time = if result.completed_fully {
        TimeSummary::Completed {
            elapsed: result.elapsed,
            remaining: result.time_limit.saturating_sub(result.elapsed),
        }
    } else {
        TimeSummary::TimedOut {
            elapsed: result.elapsed,
            time_limit: result.time_limit,
        }
    };

    ScoreReport {
        user_name: result.user_name.clone(),
        total_questions: result.total_questions,
        answered: result.answered.len(),
        correct: result.correct_count,
        incorrect: result.incorrect_count,
        percent_correct,
        time,
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            TimeSummary::Completed { elapsed, remaining } => {
                writeln!(
                    f,
                    "You answered all {} questions in {:.2} seconds.",
                    self.total_questions,
                    elapsed.as_secs_f64()
                )?;
                writeln!(
                    f,
                    "There were {:.2} seconds remaining on the clock.",
                    remaining.as_secs_f64()
                )?;
            }
            TimeSummary::TimedOut { time_limit, .. } => {
                writeln!(
                    f,
                    "You answered {} questions out of a total of {} questions in {:.2} seconds.",
                    self.answered,
                    self.total_questions,
                    time_limit.as_secs_f64()
                )?;
            }
        }
        writeln!(
            f,
            "You got {} questions right and {} questions wrong.",
            self.correct, self.incorrect
        )?;
        if self.user_name.is_empty() {
            write!(f, "Your score is {:.2}%!", self.percent_correct)
        } else {
            write!(
                f,
                "Your score is {:.2}% {}!",
                self.percent_correct, self.user_name
            )
        }
    }
}

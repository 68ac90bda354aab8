//! Session error types.
//!
//! Every failure in quizclock is fatal: there is no retryable kind. The
//! variants are grouped by [`ErrorKind`] so the CLI can tell a broken
//! question bank from a broken input stream when it prints a hint.

use thiserror::Error;

/// Errors raised by the question set, the loader, and the session engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question source held no records.
    #[error("question source contains no records")]
    EmptyInput,

    /// A record did not have exactly a prompt and an answer.
    #[error("record {record} has {fields} field(s), expected 2 (question, answer)")]
    MalformedRecord { record: usize, fields: usize },

    /// The input stream was closed or could not be read.
    #[error("input stream unavailable: {0}")]
    InputStream(#[from] std::io::Error),

    /// The prompt could not be written.
    #[error("output stream unavailable: {0}")]
    Output(std::io::Error),

    /// A session was started with a zero time limit.
    #[error("time limit must be greater than zero")]
    InvalidTimeLimit,

    /// A duration string could not be parsed.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// The engine already ran its one session.
    #[error("session already run; create a new engine for another session")]
    SessionAlreadyRun,
}

/// Coarse classification of a [`QuizError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad question bank or settings; raised before any session starts.
    Configuration,
    /// The terminal went away.
    InputStream,
    /// The API was driven out of order.
    Usage,
}

impl QuizError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::EmptyInput
            | QuizError::MalformedRecord { .. }
            | QuizError::InvalidTimeLimit
            | QuizError::InvalidDuration(_) => ErrorKind::Configuration,
            QuizError::InputStream(_) | QuizError::Output(_) => ErrorKind::InputStream,
            QuizError::SessionAlreadyRun => ErrorKind::Usage,
        }
    }

    /// Error for an input stream that reached end-of-file.
    pub(crate) fn input_closed() -> Self {
        QuizError::InputStream(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed",
        ))
    }
}

//! Scripted terminal for testing.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::QuizError;
use crate::terminal::Terminal;

/// What a [`ScriptedTerminal`] does once every scripted line is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenExhausted {
    /// Report the input stream as closed.
    Close,
    /// Block forever, like a player who never presses enter.
    Hang,
}

#[derive(Debug, Clone)]
struct ScriptedLine {
    delay: Duration,
    text: String,
}

/// A terminal that replays scripted lines and records everything written.
///
/// Delays use tokio's clock, so tests on a paused runtime run instantly.
pub struct ScriptedTerminal {
    script: VecDeque<ScriptedLine>,
    output: String,
    when_exhausted: WhenExhausted,
}

impl ScriptedTerminal {
    /// Lines that are available immediately; the input closes afterwards.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: lines
                .into_iter()
                .map(|text| ScriptedLine {
                    delay: Duration::ZERO,
                    text: text.into(),
                })
                .collect(),
            output: String::new(),
            when_exhausted: WhenExhausted::Close,
        }
    }

    /// Append a line that arrives `delay` after it is requested.
    pub fn then_after(mut self, delay: Duration, text: impl Into<String>) -> Self {
        self.script.push_back(ScriptedLine {
            delay,
            text: text.into(),
        });
        self
    }

    /// Set the behaviour once the script runs out.
    pub fn when_exhausted(mut self, behaviour: WhenExhausted) -> Self {
        self.when_exhausted = behaviour;
        self
    }

    /// Everything the engine has written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of scripted lines not yet read.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn read_line(&mut self) -> Result<String, QuizError> {
        match self.script.pop_front() {
            Some(line) => {
                if !line.delay.is_zero() {
                    tokio::time::sleep(line.delay).await;
                }
                Ok(line.text)
            }
            None => match self.when_exhausted {
                WhenExhausted::Close => Err(QuizError::input_closed()),
                WhenExhausted::Hang => std::future::pending().await,
            },
        }
    }

    fn write(&mut self, text: &str) -> Result<(), QuizError> {
        self.output.push_str(text);
        Ok(())
    }
}

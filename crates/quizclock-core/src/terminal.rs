//! Line-oriented terminal I/O for the session engine.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

use crate::error::QuizError;

/// Where the engine prints prompts and reads the player's lines.
#[async_trait]
pub trait Terminal: Send {
    /// Read one line of input without its line terminator.
    ///
    /// End of input with nothing buffered is an [`QuizError::InputStream`].
    /// Dropping the returned future abandons the read.
    async fn read_line(&mut self) -> Result<String, QuizError>;

    /// Write `text` and flush it immediately.
    fn write(&mut self, text: &str) -> Result<(), QuizError>;
}

/// Process stdin and stdout.
pub struct StdTerminal {
    input: BufReader<Stdin>,
}

impl StdTerminal {
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Terminal for StdTerminal {
    async fn read_line(&mut self) -> Result<String, QuizError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            return Err(QuizError::input_closed());
        }
        Ok(strip_line_ending(&line).to_string())
    }

    fn write(&mut self, text: &str) -> Result<(), QuizError> {
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes()).map_err(QuizError::Output)?;
        out.flush().map_err(QuizError::Output)
    }
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

//! Timed session engine.
//!
//! Drives one quiz session: greets the player, waits for them to start,
//! then asks every question in order while a [`DeadlineWatcher`] counts
//! down. The answer loop and the countdown race; whichever finishes first
//! decides how the session ends and the other is dropped.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use crate::deadline::DeadlineWatcher;
use crate::duration::format_duration;
use crate::error::QuizError;
use crate::model::{AnsweredQuestion, QuestionSet, SessionResult};
use crate::terminal::Terminal;

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every question was answered before the deadline.
    NaturalCompletion,
    /// The deadline fired first; the pending read was abandoned.
    TimeoutExpired,
}

/// Lifecycle of a [`SessionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// Announced and waiting for the player to press enter.
    AwaitingStart,
    /// Countdown running, questions being asked.
    Running,
    Finished(Termination),
}

/// A finalized result plus the path that produced it.
///
/// On [`Termination::TimeoutExpired`] the caller is expected to report and
/// end the process without waiting on the terminal again.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub result: SessionResult,
    pub termination: Termination,
}

/// Runs exactly one timed session over a [`Terminal`].
pub struct SessionEngine<T: Terminal> {
    terminal: T,
    state: SessionState,
}

impl<T: Terminal> SessionEngine<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Welcome the player and read their name.
    ///
    /// Surrounding whitespace is trimmed; an empty name is allowed.
    pub async fn greet(&mut self) -> Result<String, QuizError> {
        self.terminal
            .write("Welcome to the Quiz Game\nPlease enter your name: ")?;
        let name = self.terminal.read_line().await?;
        Ok(name.trim().to_string())
    }

    /// Run the timed session over `questions`.
    ///
    /// Input failures before or during the session are returned as errors.
    /// A timeout is not an error: it yields an incomplete result with
    /// `elapsed == time_limit`.
    pub async fn run_session(
        &mut self,
        questions: &QuestionSet,
        time_limit: Duration,
        user_name: &str,
    ) -> Result<SessionOutcome, QuizError> {
        if self.state != SessionState::NotStarted {
            return Err(QuizError::SessionAlreadyRun);
        }
        if time_limit.is_zero() {
            return Err(QuizError::InvalidTimeLimit);
        }

        self.state = SessionState::AwaitingStart;
        self.terminal.write(&format!(
            "You have {} to finish the test. There are {} questions in the test.\nPress ENTER to start the test",
            format_duration(time_limit),
            questions.len()
        ))?;
        self.terminal.read_line().await?;

        let started_at = Utc::now();
        let start = Instant::now();
        let deadline = start + time_limit;
        let mut watcher = DeadlineWatcher::arm(time_limit);
        self.state = SessionState::Running;
        tracing::info!(questions = questions.len(), ?time_limit, "session started");

        let mut answered = Vec::with_capacity(questions.len());
        let termination = {
            let answer_loop = ask_all(&mut self.terminal, questions, &mut answered, deadline);
            tokio::select! {
                biased;
                () = watcher.expired() => Termination::TimeoutExpired,
                finished = answer_loop => finished?,
            }
        };
        watcher.cancel();

        let elapsed = match termination {
            Termination::NaturalCompletion => start.elapsed(),
            Termination::TimeoutExpired => {
                if let Err(e) = self.terminal.write(&format!("\nTime's Up {user_name}!\n")) {
                    tracing::warn!("failed to announce timeout: {e}");
                }
                time_limit
            }
        };
        self.state = SessionState::Finished(termination);

        let result = SessionResult::finalize(
            questions,
            answered,
            user_name,
            elapsed,
            time_limit,
            started_at,
        );
        tracing::info!(
            ?termination,
            answered = result.answered_count(),
            correct = result.correct_count,
            "session finished"
        );

        Ok(SessionOutcome {
            result,
            termination,
        })
    }
}

/// Ask each question in order, appending every response to `answered`.
///
/// A response read at or after `deadline` is discarded and ends the loop
/// as a timeout.
async fn ask_all<T: Terminal + ?Sized>(
    terminal: &mut T,
    questions: &QuestionSet,
    answered: &mut Vec<AnsweredQuestion>,
    deadline: Instant,
) -> Result<Termination, QuizError> {
    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        terminal.write(&format!("{number}. {} = ", question.prompt))?;
        let line = terminal.read_line().await?;
        if Instant::now() >= deadline {
            tracing::debug!(number, "answer arrived after the deadline");
            return Ok(Termination::TimeoutExpired);
        }
        let response = question.check(&line);
        tracing::debug!(number, correct = response.correct, "answer recorded");
        answered.push(response);
    }
    Ok(Termination::NaturalCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionRecord;
    use crate::scripted::{ScriptedTerminal, WhenExhausted};

    fn two_questions() -> QuestionSet {
        QuestionSet::in_order(vec![
            QuestionRecord::new("1+1", "2"),
            QuestionRecord::new("2+1", "3"),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn greet_trims_name() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(["  Grace Hopper \t"]));
        assert_eq!(engine.greet().await.unwrap(), "Grace Hopper");
        assert!(engine.terminal().output().contains("Please enter your name: "));
    }

    #[tokio::test]
    async fn greet_accepts_empty_name() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new([""]));
        assert_eq!(engine.greet().await.unwrap(), "");
    }

    #[tokio::test]
    async fn greet_fails_on_closed_input() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(Vec::<String>::new()));
        assert!(matches!(
            engine.greet().await,
            Err(QuizError::InputStream(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn prompts_are_numbered_from_one() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(["", "2", "3"]));
        engine
            .run_session(&two_questions(), Duration::from_secs(30), "ada")
            .await
            .unwrap();
        let out = engine.terminal().output();
        assert!(out.contains("You have 30s to finish the test. There are 2 questions in the test."));
        assert!(out.contains("1. 1+1 = "));
        assert!(out.contains("2. 2+1 = "));
        assert_eq!(
            engine.state(),
            SessionState::Finished(Termination::NaturalCompletion)
        );
    }

    #[tokio::test]
    async fn zero_time_limit_rejected() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new([""]));
        let err = engine
            .run_session(&two_questions(), Duration::ZERO, "ada")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidTimeLimit));
        assert_eq!(engine.state(), SessionState::NotStarted);
    }

    #[tokio::test(start_paused = true)]
    async fn second_session_rejected() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(["", "2", "3", "", "2", "3"]));
        engine
            .run_session(&two_questions(), Duration::from_secs(30), "ada")
            .await
            .unwrap();
        let err = engine
            .run_session(&two_questions(), Duration::from_secs(30), "ada")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::SessionAlreadyRun));
    }

    #[tokio::test]
    async fn closed_input_before_start_is_fatal() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(Vec::<String>::new()));
        let err = engine
            .run_session(&two_questions(), Duration::from_secs(30), "ada")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InputStream(_)));
        assert_eq!(engine.state(), SessionState::AwaitingStart);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_mid_session_is_fatal() {
        let mut engine = SessionEngine::new(ScriptedTerminal::new(["", "2"]));
        let err = engine
            .run_session(&two_questions(), Duration::from_secs(30), "ada")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InputStream(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_announces_player() {
        let terminal = ScriptedTerminal::new([""]).when_exhausted(WhenExhausted::Hang);
        let mut engine = SessionEngine::new(terminal);
        let outcome = engine
            .run_session(&two_questions(), Duration::from_secs(2), "Ada")
            .await
            .unwrap();
        assert_eq!(outcome.termination, Termination::TimeoutExpired);
        assert!(engine.terminal().output().ends_with("\nTime's Up Ada!\n"));
        assert_eq!(
            engine.state(),
            SessionState::Finished(Termination::TimeoutExpired)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn answer_landing_on_the_deadline_is_a_timeout() {
        let set = QuestionSet::in_order(vec![QuestionRecord::new("2+2", "4")]).unwrap();
        let terminal = ScriptedTerminal::new([""]).then_after(Duration::from_secs(1), "4");
        let mut engine = SessionEngine::new(terminal);
        let outcome = engine
            .run_session(&set, Duration::from_secs(1), "Ada")
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::TimeoutExpired);
        assert_eq!(outcome.result.elapsed, Duration::from_secs(1));
        assert!(outcome.result.answered.is_empty());
        assert!(!outcome.result.completed_fully);
        assert!(engine.terminal().output().ends_with("\nTime's Up Ada!\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn answer_just_before_the_deadline_completes() {
        let set = QuestionSet::in_order(vec![QuestionRecord::new("2+2", "4")]).unwrap();
        let terminal = ScriptedTerminal::new([""]).then_after(Duration::from_millis(999), "4");
        let mut engine = SessionEngine::new(terminal);
        let outcome = engine
            .run_session(&set, Duration::from_secs(1), "Ada")
            .await
            .unwrap();

        assert_eq!(outcome.termination, Termination::NaturalCompletion);
        assert!(outcome.result.elapsed < outcome.result.time_limit);
        assert!(outcome.result.completed_fully);
    }
}

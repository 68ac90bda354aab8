//! Core data model types for quizclock.
//!
//! A [`QuestionSet`] is fixed before a session starts; the engine turns it
//! into a [`SessionResult`] one [`AnsweredQuestion`] at a time.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::duration;
use crate::error::QuizError;

/// One prompt and its correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Text shown to the player.
    pub prompt: String,
    /// The exact answer that scores.
    pub answer: String,
}

impl QuestionRecord {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Score a raw line of user input against this record.
    ///
    /// Surrounding whitespace is trimmed from the input; the comparison is
    /// otherwise exact and case-sensitive.
    pub fn check(&self, raw_input: &str) -> AnsweredQuestion {
        let user_answer = raw_input.trim().to_string();
        let correct = user_answer == self.answer;
        AnsweredQuestion {
            record: self.clone(),
            user_answer,
            correct,
        }
    }
}

/// A question together with the player's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(flatten)]
    pub record: QuestionRecord,
    /// The trimmed answer the player typed.
    pub user_answer: String,
    /// Whether `user_answer` equals the correct answer.
    pub correct: bool,
}

/// An ordered, non-empty, read-only sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    records: Vec<QuestionRecord>,
}

impl QuestionSet {
    /// Build a question set, optionally shuffling it with `rng`.
    ///
    /// The shuffle is a uniform permutation (Fisher-Yates). Passing a seeded
    /// RNG makes the order reproducible.
    pub fn build<R: Rng + ?Sized>(
        records: Vec<QuestionRecord>,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if records.is_empty() {
            return Err(QuizError::EmptyInput);
        }
        let mut records = records;
        if shuffle {
            records.shuffle(rng);
        }
        Ok(Self { records })
    }

    /// Build a question set in load order.
    pub fn in_order(records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        if records.is_empty() {
            return Err(QuizError::EmptyInput);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: a question set holds at least one record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The outcome of one session.
///
/// `correct_count + incorrect_count == answered.len() <= total_questions`,
/// and `completed_fully` holds exactly when every question was answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// Player name; may be empty.
    pub user_name: String,
    pub total_questions: usize,
    /// Answers in the order the questions were asked.
    pub answered: Vec<AnsweredQuestion>,
    /// Questions never reached, in set order.
    #[serde(default)]
    pub unanswered: Vec<QuestionRecord>,
    pub correct_count: usize,
    pub incorrect_count: usize,
    #[serde(with = "duration::as_secs_f64")]
    pub elapsed: Duration,
    #[serde(with = "duration::as_secs_f64")]
    pub time_limit: Duration,
    pub completed_fully: bool,
    /// Wall-clock time the countdown began.
    pub started_at: DateTime<Utc>,
}

impl SessionResult {
    /// Finalize a result from the answers collected for `questions`.
    pub fn finalize(
        questions: &QuestionSet,
        answered: Vec<AnsweredQuestion>,
        user_name: &str,
        elapsed: Duration,
        time_limit: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        let correct_count = answered.iter().filter(|a| a.correct).count();
        let incorrect_count = answered.len() - correct_count;
        let unanswered = questions.records()[answered.len().min(questions.len())..].to_vec();

        Self {
            user_name: user_name.to_string(),
            total_questions: questions.len(),
            completed_fully: answered.len() == questions.len(),
            answered,
            unanswered,
            correct_count,
            incorrect_count,
            elapsed,
            time_limit,
            started_at,
        }
    }

    /// Number of questions the player responded to.
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }
}

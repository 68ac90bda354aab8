//! CSV question bank loader.
//!
//! A question bank is a header-less CSV file of `question,answer` records.
//! Loading applies the question-count limit first and the shuffle second.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;

use crate::error::QuizError;
use crate::model::{QuestionRecord, QuestionSet};

/// Read every record from a question bank file.
pub fn read_records(path: &Path) -> Result<Vec<QuestionRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open question file: {}", path.display()))?;

    parse_records(file).with_context(|| format!("failed to read questions: {}", path.display()))
}

/// Parse question records from any CSV source (useful for testing).
pub fn parse_records<R: Read>(source: R) -> Result<Vec<QuestionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.context("malformed CSV")?;
        if row.len() != 2 {
            return Err(QuizError::MalformedRecord {
                record: index + 1,
                fields: row.len(),
            }
            .into());
        }
        records.push(QuestionRecord::new(&row[0], &row[1]));
    }
    Ok(records)
}

/// Keep the first `max_count` records; 0 or an oversized count keeps all.
pub fn take_questions(mut records: Vec<QuestionRecord>, max_count: usize) -> Vec<QuestionRecord> {
    if max_count > 0 && max_count < records.len() {
        records.truncate(max_count);
    }
    records
}

/// Load a question set from `path`.
///
/// Fails with [`QuizError::EmptyInput`] (inside the error chain) when the
/// file has no records. Validation warnings on the selected records are
/// logged, not returned.
pub fn load_questions<R: Rng + ?Sized>(
    path: &Path,
    max_count: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<QuestionSet> {
    let records = read_records(path)?;
    let available = records.len();
    let records = take_questions(records, max_count);

    tracing::debug!(
        available,
        selected = records.len(),
        shuffle,
        "loaded question bank {}",
        path.display()
    );
    for warning in validate_records(&records) {
        tracing::warn!(record = ?warning.record, "{}: {}", path.display(), warning.message);
    }

    QuestionSet::build(records, shuffle, rng)
        .with_context(|| format!("no questions in {}", path.display()))
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based record number (if applicable).
    pub record: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a question bank for entries that can never be scored fairly.
pub fn validate_records(records: &[QuestionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if records.is_empty() {
        warnings.push(ValidationWarning {
            record: None,
            message: "question bank is empty".into(),
        });
    }

    let mut seen_prompts = std::collections::HashMap::new();
    for (index, record) in records.iter().enumerate() {
        let number = index + 1;

        if let Some(first) = seen_prompts.insert(record.prompt.as_str(), number) {
            warnings.push(ValidationWarning {
                record: Some(number),
                message: format!("duplicate question (first seen at record {first})"),
            });
            seen_prompts.insert(record.prompt.as_str(), first);
        }

        if record.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                record: Some(number),
                message: "question is empty".into(),
            });
        }

        if record.answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                record: Some(number),
                message: "answer is empty".into(),
            });
        } else if record.answer.trim() != record.answer {
            warnings.push(ValidationWarning {
                record: Some(number),
                message: format!(
                    "answer {:?} has surrounding whitespace and can never match",
                    record.answer
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    const PROBLEMS: &str = "5+5,10\n1+1,2\n8+3,11\n\"what 2+2, sir?\",4\n";

    #[test]
    fn parse_maps_columns() {
        let records = parse_records(PROBLEMS.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], QuestionRecord::new("5+5", "10"));
        assert_eq!(records[3], QuestionRecord::new("what 2+2, sir?", "4"));
    }

    #[test]
    fn parse_keeps_field_whitespace() {
        let records = parse_records("a , b\n".as_bytes()).unwrap();
        assert_eq!(records[0], QuestionRecord::new("a ", " b"));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let err = parse_records("1+1,2\n2+2\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuizError>(),
            Some(QuizError::MalformedRecord {
                record: 2,
                fields: 1
            })
        ));

        assert!(parse_records("1+1,2,extra\n".as_bytes()).is_err());
    }

    #[test]
    fn take_questions_limits() {
        let records = parse_records(PROBLEMS.as_bytes()).unwrap();
        assert_eq!(take_questions(records.clone(), 0).len(), 4);
        assert_eq!(take_questions(records.clone(), 2).len(), 2);
        assert_eq!(take_questions(records.clone(), 4).len(), 4);
        assert_eq!(take_questions(records.clone(), 99).len(), 4);
        assert_eq!(take_questions(records, 1)[0].prompt, "5+5");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let set = load_questions(&path, 3, false, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.records()[2].prompt, "8+3");
    }

    #[test]
    fn load_shuffles_only_the_selected_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let set = load_questions(&path, 2, true, &mut StdRng::seed_from_u64(9)).unwrap();
        let mut prompts: Vec<_> = set.iter().map(|q| q.prompt.as_str()).collect();
        prompts.sort();
        assert_eq!(prompts, vec!["1+1", "5+5"]);
    }

    #[test]
    fn load_warns_about_unmatchable_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, "2+2,4\n3+3, 6\n").unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let set = tracing::subscriber::with_default(subscriber, || {
            load_questions(&path, 0, false, &mut StdRng::seed_from_u64(1))
        })
        .unwrap();

        assert_eq!(set.len(), 2);
        let logged = logs.contents();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("can never match"));
        assert!(logged.contains("Some(2)"));
    }

    #[test]
    fn load_clean_bank_logs_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            load_questions(&path, 0, false, &mut StdRng::seed_from_u64(1))
        })
        .unwrap();

        assert!(logs.contents().is_empty());
    }

    #[test]
    fn load_empty_file_is_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let err = load_questions(&path, 0, false, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QuizError>(),
            Some(QuizError::EmptyInput)
        ));
    }

    #[test]
    fn load_missing_file() {
        let err = load_questions(
            Path::new("/nonexistent/problems.csv"),
            0,
            false,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to open question file"));
    }

    #[test]
    fn validate_flags_problems() {
        let records = vec![
            QuestionRecord::new("2+2", "4"),
            QuestionRecord::new("2+2", "4"),
            QuestionRecord::new("", "1"),
            QuestionRecord::new("3+3", ""),
            QuestionRecord::new("4+4", " 8"),
        ];
        let warnings = validate_records(&records);
        assert!(warnings
            .iter()
            .any(|w| w.record == Some(2) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.record == Some(3) && w.message.contains("question is empty")));
        assert!(warnings
            .iter()
            .any(|w| w.record == Some(4) && w.message.contains("answer is empty")));
        assert!(warnings
            .iter()
            .any(|w| w.record == Some(5) && w.message.contains("never match")));
    }

    #[test]
    fn validate_clean_bank() {
        let records = parse_records(PROBLEMS.as_bytes()).unwrap();
        assert!(validate_records(&records).is_empty());
        assert_eq!(validate_records(&[]).len(), 1);
    }
}

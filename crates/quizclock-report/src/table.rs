//! Tabular listing of a session's questions.

use comfy_table::{Cell, Table};

use quizclock_core::model::SessionResult;

/// Build the results table: answered questions first, then any the clock
/// cut off, which show an empty answer and `false`.
pub fn results_table(result: &SessionResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "User Answer", "Correct"]);

    for (index, answer) in result.answered.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&answer.record.prompt),
            Cell::new(&answer.record.answer),
            Cell::new(&answer.user_answer),
            Cell::new(answer.correct),
        ]);
    }

    let offset = result.answered.len();
    for (index, question) in result.unanswered.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + index + 1),
            Cell::new(&question.prompt),
            Cell::new(&question.answer),
            Cell::new(""),
            Cell::new(false),
        ]);
    }

    table
}

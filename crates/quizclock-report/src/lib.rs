//! quizclock-report — Rendering of finished sessions.
//!
//! Turns a [`SessionResult`] into what the player sees at the end: the
//! score summary and a table of every question, or a JSON document for
//! scripts.

use quizclock_core::model::SessionResult;
use quizclock_core::report::score;

pub mod json;
pub mod table;

/// Render the score summary followed by the results table.
pub fn render_text(result: &SessionResult) -> String {
    let report = score(result);
    format!("{report}\n{}", table::results_table(result))
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn text_has_summary_then_table() {
        let result = fixtures::result(&["4", "7", "10"], Duration::from_secs(3));
        let text = render_text(&result);

        let summary_at = text.find("Your score is 66.67% Ada!").unwrap();
        let table_at = text.find("User Answer").unwrap();
        assert!(summary_at < table_at);
        assert!(text.contains("You got 2 questions right and 1 questions wrong."));
    }
}

//! The `quizclock validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizclock_core::loader;

pub fn execute(path: PathBuf) -> Result<()> {
    let records = loader::read_records(&path)?;
    println!(
        "Question bank: {} ({} questions)",
        path.display(),
        records.len()
    );

    let warnings = loader::validate_records(&records);
    for w in &warnings {
        let prefix = w
            .record
            .map(|n| format!("  [record {n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

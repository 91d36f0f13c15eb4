//! The `quizgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        quizgrade_core::parser::load_bank_directory(&bank_path)?
    } else {
        vec![quizgrade_core::parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for file in &banks {
        println!("Bank: {} ({} questions)", file.name, file.bank.len());

        let warnings = quizgrade_core::parser::validate_bank(file);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

//! The `quizgrade list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::load_bank;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Question", "Choices", "Answer"]);

    for question in bank.all() {
        let choices = question
            .kind
            .choices()
            .map(|c| c.join(" | "))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&question.id),
            Cell::new(question.kind.type_name()),
            Cell::new(&question.prompt),
            Cell::new(choices),
            Cell::new(question.answer_key_text()),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", bank.len());

    Ok(())
}

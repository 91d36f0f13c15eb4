//! The `quizgrade grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde_json::{json, Value};

use quizgrade_core::{grade, Answer, GradingResult, QuestionBank};
use quizgrade_server::submission::answers_from_value;

use super::load_bank;

pub fn execute(answers_path: PathBuf, bank_path: Option<PathBuf>, format: String) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", answers_path.display()))?;

    // Accept a bare array as shorthand for { "answers": [...] }
    let payload = if payload.is_array() {
        json!({ "answers": payload })
    } else {
        payload
    };
    let answers = answers_from_value(&payload)
        .with_context(|| format!("invalid answers file: {}", answers_path.display()))?;

    let result = grade(&answers, &bank);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_summary(&answers, &bank, &result),
    }

    Ok(())
}

fn print_summary(answers: &[Answer], bank: &QuestionBank, result: &GradingResult) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Question", "Your answer", "Result", "Correct answer"]);

    for (answer, verdict) in answers.iter().zip(&result.per_question) {
        let question = bank.by_id(&answer.id);
        let prompt = question
            .map(|q| q.prompt.clone())
            .unwrap_or_else(|| "(unknown question)".to_string());
        let given = question
            .map(|q| q.format_answer(&answer.value))
            .unwrap_or_else(|| answer.value.to_string());
        let expected = match question {
            Some(q) if !verdict.correct => q.answer_key_text(),
            _ => String::new(),
        };
        table.add_row(vec![
            Cell::new(&verdict.id),
            Cell::new(prompt),
            Cell::new(given),
            Cell::new(if verdict.correct { "correct" } else { "incorrect" }),
            Cell::new(expected),
        ]);
    }

    println!("{table}");
    println!(
        "Score: {} / {} ({}%)",
        result.score,
        result.total,
        result.percentage()
    );
    if result.passed() {
        println!("Passed!");
    } else {
        println!("Keep practicing!");
    }
}

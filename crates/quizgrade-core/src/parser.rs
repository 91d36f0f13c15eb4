//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::model::{Question, QuestionKind};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// A question bank loaded from a file, with its header.
#[derive(Debug, Clone)]
pub struct BankFile {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    pub description: String,
    /// The indexed questions.
    pub bank: QuestionBank,
}

/// Parse a single TOML file into a `BankFile`.
pub fn parse_bank(path: &Path) -> Result<BankFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `BankFile` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<BankFile> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let bank = QuestionBank::new(parsed.questions)
        .with_context(|| format!("invalid bank: {}", source_path.display()))?;

    Ok(BankFile {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        bank,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<BankFile>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id, rendered (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for problems that do not prevent grading.
pub fn validate_bank(file: &BankFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if file.bank.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    for question in file.bank.all() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.to_string()),
                message,
            });
        };

        if question.prompt.trim().is_empty() {
            warn("question text is empty".into());
        }

        match &question.kind {
            QuestionKind::Text { correct_text } => {
                if correct_text.trim().is_empty() {
                    warn("correctText is empty; no answer can match it".into());
                }
            }
            QuestionKind::SingleChoice { choices, .. } => {
                if choices.len() < 2 {
                    warn(format!("radio question has only {} choice(s)", choices.len()));
                }
                check_duplicate_choices(choices, &mut warn);
            }
            QuestionKind::MultiChoice {
                choices,
                correct_indexes,
            } => {
                if choices.len() < 2 {
                    warn(format!(
                        "checkbox question has only {} choice(s)",
                        choices.len()
                    ));
                }
                check_duplicate_choices(choices, &mut warn);

                let unique: HashSet<_> = correct_indexes.iter().collect();
                if unique.len() != correct_indexes.len() {
                    warn(
                        "correctIndexes contains repeated indexes; only an identical repeated selection matches"
                            .into(),
                    );
                }
                match correct_indexes.len() {
                    0 => warn("correctIndexes is empty; only an empty selection is correct".into()),
                    1 => warn("checkbox question has a single correct index; consider radio".into()),
                    _ => {}
                }
            }
        }
    }

    warnings
}

fn check_duplicate_choices(choices: &[String], warn: &mut impl FnMut(String)) {
    let mut seen = HashSet::new();
    for choice in choices {
        if !seen.insert(choice.trim().to_lowercase()) {
            warn(format!("duplicate choice: {choice}"));
        }
    }
}

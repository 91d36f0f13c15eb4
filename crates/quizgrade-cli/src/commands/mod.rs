pub mod grade;
pub mod init;
pub mod list;
pub mod serve;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use quizgrade_core::parser::parse_bank;
use quizgrade_core::QuestionBank;

/// Load a bank file, or the built-in bank when no path is given.
fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(path) => Ok(parse_bank(path)?.bank),
        None => Ok(QuestionBank::builtin()),
    }
}

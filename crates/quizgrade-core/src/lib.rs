//! quizgrade-core: Question bank, answer model, and grading logic.
//!
//! This crate defines the data model, the immutable question bank, and the
//! grader that the server and CLI build on.

pub mod bank;
pub mod error;
pub mod grader;
pub mod model;
pub mod parser;

pub use bank::QuestionBank;
pub use grader::grade;
pub use model::{Answer, AnswerValue, GradingResult, Question, QuestionId, QuestionKind, Verdict};

//! Question and bank error types.
//!
//! These errors describe question records that break the answer-key
//! invariants, and banks that cannot be indexed. Grading itself never fails.

use thiserror::Error;

use crate::model::QuestionId;

/// A question record whose answer key does not match its declared kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    /// The id is neither an integer nor a string.
    #[error("question {0}: id must be an integer or a string")]
    InvalidId(QuestionId),

    /// The `type` field is not one of `text`, `radio`, `checkbox`.
    #[error("question {id}: unknown question type '{kind}'")]
    UnknownType { id: QuestionId, kind: String },

    /// The answer field matching the question type is absent.
    #[error("question {id}: missing '{field}' for a '{kind}' question")]
    MissingAnswer {
        id: QuestionId,
        kind: &'static str,
        field: &'static str,
    },

    /// An answer field belonging to another question type is populated.
    #[error("question {id}: '{field}' is not allowed on a '{kind}' question")]
    UnexpectedField {
        id: QuestionId,
        kind: &'static str,
        field: &'static str,
    },

    /// A choice question without any choices.
    #[error("question {id}: '{kind}' question has no choices")]
    MissingChoices { id: QuestionId, kind: &'static str },

    /// A correct index that does not point into `choices`.
    #[error("question {id}: correct index {index} is out of range for {len} choices")]
    IndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

/// Errors raised while building a [`QuestionBank`](crate::bank::QuestionBank).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    /// Two questions share an identifier.
    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    /// A question whose answer key does not fit its choices.
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_question() {
        let err = QuestionError::IndexOutOfRange {
            id: QuestionId::Int(7),
            index: 4,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "question 7: correct index 4 is out of range for 4 choices"
        );

        let err = BankError::DuplicateId(QuestionId::Text("q1".into()));
        assert_eq!(err.to_string(), "duplicate question id: \"q1\"");
    }
}

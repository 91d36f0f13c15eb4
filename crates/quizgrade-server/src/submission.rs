//! Submission payload validation.
//!
//! Checks the `{ "answers": [...] }` envelope before anything is graded.
//! Answer ids and values are never rejected here; odd shapes grade as
//! incorrect.

use serde::Deserialize;
use serde_json::Value;

use quizgrade_core::Answer;

use crate::error::ApiError;

/// Parse and validate a raw request body.
pub fn parse_submission(body: &[u8]) -> Result<Vec<Answer>, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(ApiError::InvalidJson)?;
    answers_from_value(&payload)
}

/// Validate an already parsed payload.
pub fn answers_from_value(payload: &Value) -> Result<Vec<Answer>, ApiError> {
    let entries = payload
        .get("answers")
        .and_then(Value::as_array)
        .ok_or(ApiError::InvalidPayload)?;

    if entries
        .iter()
        .any(|entry| entry.get("id").is_none() || entry.get("value").is_none())
    {
        return Err(ApiError::MissingAnswerFields);
    }

    // Every JSON id and value decodes, so this only fails on non-objects.
    entries
        .iter()
        .map(|entry| Answer::deserialize(entry).map_err(|_| ApiError::MissingAnswerFields))
        .collect()
}

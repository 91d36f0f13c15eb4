//! Core data model types for quizgrade.
//!
//! Questions, submitted answers, and grading results, together with the
//! client-facing JSON record shape questions are exchanged in.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::QuestionError;

/// Minimum percentage for a graded submission to count as passing.
pub const PASS_PERCENTAGE: u32 = 70;

/// Identifier of a question: either an integer or a string.
///
/// `1` and `"1"` are different identifiers; `1.0` is the integer `1`. Any
/// other JSON id a client sends (`null`, `true`, `1.5`, out-of-range integers)
/// is kept as [`QuestionId::Other`] holding its JSON text. Such ids are echoed
/// back but never name a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionId {
    Int(i64),
    Text(String),
    Other(String),
}

impl QuestionId {
    /// Whether this id can name a question in a bank.
    pub fn is_addressable(&self) -> bool {
        !matches!(self, QuestionId::Other(_))
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Int(n) => write!(f, "{n}"),
            QuestionId::Text(s) => write!(f, "{s:?}"),
            QuestionId::Other(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuestionId::Int(n) => serializer.serialize_i64(*n),
            QuestionId::Text(s) => serializer.serialize_str(s),
            QuestionId::Other(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => value.serialize(serializer),
                Err(_) => serializer.serialize_str(raw),
            },
        }
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::String(s) => QuestionId::Text(s.clone()),
            Value::Number(n) => match integral(n) {
                Some(n) => QuestionId::Int(n),
                None => QuestionId::Other(value.to_string()),
            },
            _ => QuestionId::Other(value.to_string()),
        })
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        QuestionId::Int(n)
    }
}

impl From<i32> for QuestionId {
    fn from(n: i32) -> Self {
        QuestionId::Int(n.into())
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        QuestionId::Text(s)
    }
}

/// The answer shape of a question together with its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text, compared trimmed and case-insensitively.
    Text { correct_text: String },
    /// Exactly one choice is correct.
    SingleChoice {
        choices: Vec<String>,
        correct_index: usize,
    },
    /// A set of choices is correct.
    MultiChoice {
        choices: Vec<String>,
        correct_indexes: Vec<usize>,
    },
}

impl QuestionKind {
    /// Wire name of the kind (`text`, `radio`, `checkbox`).
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::Text { .. } => "text",
            QuestionKind::SingleChoice { .. } => "radio",
            QuestionKind::MultiChoice { .. } => "checkbox",
        }
    }

    /// The display choices, for choice kinds.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            QuestionKind::Text { .. } => None,
            QuestionKind::SingleChoice { choices, .. }
            | QuestionKind::MultiChoice { choices, .. } => Some(choices),
        }
    }
}

/// A single quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub id: QuestionId,
    /// Display text. Not consulted when grading.
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn text(id: impl Into<QuestionId>, prompt: &str, correct_text: &str) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.to_string(),
            kind: QuestionKind::Text {
                correct_text: correct_text.to_string(),
            },
        }
    }

    pub fn single_choice(
        id: impl Into<QuestionId>,
        prompt: &str,
        choices: &[&str],
        correct_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.to_string(),
            kind: QuestionKind::SingleChoice {
                choices: choices.iter().map(|c| c.to_string()).collect(),
                correct_index,
            },
        }
    }

    pub fn multi_choice(
        id: impl Into<QuestionId>,
        prompt: &str,
        choices: &[&str],
        correct_indexes: &[usize],
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.to_string(),
            kind: QuestionKind::MultiChoice {
                choices: choices.iter().map(|c| c.to_string()).collect(),
                correct_indexes: correct_indexes.to_vec(),
            },
        }
    }

    /// Check the answer key against the question's own shape.
    ///
    /// Choice questions need at least one choice and every correct index must
    /// point into `choices`. The id must be an integer or a string.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if !self.id.is_addressable() {
            return Err(QuestionError::InvalidId(self.id.clone()));
        }
        let (choices, indexes): (&[String], &[usize]) = match &self.kind {
            QuestionKind::Text { .. } => return Ok(()),
            QuestionKind::SingleChoice {
                choices,
                correct_index,
            } => (choices.as_slice(), std::slice::from_ref(correct_index)),
            QuestionKind::MultiChoice {
                choices,
                correct_indexes,
            } => (choices.as_slice(), correct_indexes.as_slice()),
        };
        if choices.is_empty() {
            return Err(QuestionError::MissingChoices {
                id: self.id.clone(),
                kind: self.kind.type_name(),
            });
        }
        match indexes.iter().find(|&&i| i >= choices.len()) {
            Some(&index) => Err(QuestionError::IndexOutOfRange {
                id: self.id.clone(),
                index,
                len: choices.len(),
            }),
            None => Ok(()),
        }
    }

    /// Human-readable rendering of the answer key.
    pub fn answer_key_text(&self) -> String {
        let choice = |choices: &[String], i: usize| {
            choices.get(i).cloned().unwrap_or_else(|| i.to_string())
        };
        match &self.kind {
            QuestionKind::Text { correct_text } => correct_text.clone(),
            QuestionKind::SingleChoice {
                choices,
                correct_index,
            } => choice(choices, *correct_index),
            QuestionKind::MultiChoice {
                choices,
                correct_indexes,
            } => correct_indexes
                .iter()
                .map(|&i| choice(choices, i))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Human-readable rendering of a submitted value against this question.
    ///
    /// Indices are shown as the choice they select when they are in range.
    pub fn format_answer(&self, value: &AnswerValue) -> String {
        let choice = |i: i64| -> String {
            usize::try_from(i)
                .ok()
                .and_then(|i| self.kind.choices().and_then(|c| c.get(i)))
                .cloned()
                .unwrap_or_else(|| i.to_string())
        };
        match (&self.kind, value) {
            (QuestionKind::SingleChoice { .. }, AnswerValue::Index(i)) => choice(*i),
            (QuestionKind::MultiChoice { .. }, AnswerValue::Indices(v)) => v
                .iter()
                .map(|&i| choice(i))
                .collect::<Vec<_>>()
                .join(", "),
            _ => value.to_string(),
        }
    }
}

/// The client-facing record a question is serialized as.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: QuestionId,
    #[serde(rename = "type")]
    kind: String,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_indexes: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_text: Option<String>,
}

impl From<Question> for QuestionRecord {
    fn from(q: Question) -> Self {
        let kind = q.kind.type_name().to_string();
        let mut record = QuestionRecord {
            id: q.id,
            kind,
            question: q.prompt,
            choices: None,
            correct_index: None,
            correct_indexes: None,
            correct_text: None,
        };
        match q.kind {
            QuestionKind::Text { correct_text } => record.correct_text = Some(correct_text),
            QuestionKind::SingleChoice {
                choices,
                correct_index,
            } => {
                record.choices = Some(choices);
                record.correct_index = Some(correct_index);
            }
            QuestionKind::MultiChoice {
                choices,
                correct_indexes,
            } => {
                record.choices = Some(choices);
                record.correct_indexes = Some(correct_indexes);
            }
        }
        record
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(r: QuestionRecord) -> Result<Self, Self::Error> {
        let id = r.id;
        let unexpected = |kind: &'static str, field: &'static str| QuestionError::UnexpectedField {
            id: id.clone(),
            kind,
            field,
        };
        let missing = |kind: &'static str, field: &'static str| QuestionError::MissingAnswer {
            id: id.clone(),
            kind,
            field,
        };

        let kind = match r.kind.as_str() {
            "text" => {
                if r.choices.is_some() {
                    return Err(unexpected("text", "choices"));
                }
                if r.correct_index.is_some() {
                    return Err(unexpected("text", "correctIndex"));
                }
                if r.correct_indexes.is_some() {
                    return Err(unexpected("text", "correctIndexes"));
                }
                let correct_text = r.correct_text.ok_or_else(|| missing("text", "correctText"))?;
                QuestionKind::Text { correct_text }
            }
            "radio" => {
                if r.correct_indexes.is_some() {
                    return Err(unexpected("radio", "correctIndexes"));
                }
                if r.correct_text.is_some() {
                    return Err(unexpected("radio", "correctText"));
                }
                let correct_index = r.correct_index.ok_or_else(|| missing("radio", "correctIndex"))?;
                QuestionKind::SingleChoice {
                    choices: r.choices.unwrap_or_default(),
                    correct_index,
                }
            }
            "checkbox" => {
                if r.correct_index.is_some() {
                    return Err(unexpected("checkbox", "correctIndex"));
                }
                if r.correct_text.is_some() {
                    return Err(unexpected("checkbox", "correctText"));
                }
                let correct_indexes = r
                    .correct_indexes
                    .ok_or_else(|| missing("checkbox", "correctIndexes"))?;
                QuestionKind::MultiChoice {
                    choices: r.choices.unwrap_or_default(),
                    correct_indexes,
                }
            }
            other => {
                return Err(QuestionError::UnknownType {
                    id,
                    kind: other.to_string(),
                })
            }
        };

        let question = Question {
            id,
            prompt: r.question,
            kind,
        };
        question.validate()?;
        Ok(question)
    }
}

/// A submitted answer value.
///
/// Integral JSON numbers decode as indices whether written `2` or `2.0`.
/// `Other` holds any value outside the three gradable shapes so that a
/// submission with an odd value still deserializes and grades as incorrect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(i64),
    Indices(Vec<i64>),
    Text(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let decoded = match &value {
            Value::Number(n) => integral(n).map(AnswerValue::Index),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => integral(n),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(AnswerValue::Indices),
            Value::String(s) => Some(AnswerValue::Text(s.clone())),
            _ => None,
        };
        Ok(decoded.unwrap_or(AnswerValue::Other(value)))
    }
}

/// An `i64` for JSON numbers with no fractional part.
fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Index(i) => write!(f, "{i}"),
            AnswerValue::Indices(v) => {
                let parts: Vec<String> = v.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AnswerValue::Text(s) => f.write_str(s),
            AnswerValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        AnswerValue::Index(i)
    }
}

impl From<i32> for AnswerValue {
    fn from(i: i32) -> Self {
        AnswerValue::Index(i.into())
    }
}

impl From<Vec<i64>> for AnswerValue {
    fn from(v: Vec<i64>) -> Self {
        AnswerValue::Indices(v)
    }
}

impl From<Vec<i32>> for AnswerValue {
    fn from(v: Vec<i32>) -> Self {
        AnswerValue::Indices(v.into_iter().map(i64::from).collect())
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// One submitted response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: QuestionId,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(id: impl Into<QuestionId>, value: impl Into<AnswerValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Correctness of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub id: QuestionId,
    pub correct: bool,
}

/// Outcome of grading a batch of answers against a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Number of answers judged correct.
    pub score: usize,
    /// Number of questions in the bank, not the number of answers.
    pub total: usize,
    /// One verdict per submitted answer, in submission order.
    #[serde(rename = "results")]
    pub per_question: Vec<Verdict>,
}

impl GradingResult {
    /// Score as a whole percentage of `total`, rounded half up.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// Whether the percentage reaches [`PASS_PERCENTAGE`].
    pub fn passed(&self) -> bool {
        self.percentage() >= PASS_PERCENTAGE
    }
}

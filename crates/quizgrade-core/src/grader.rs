//! Answer grading.
//!
//! Grading is total: unknown ids and answers whose shape does not match the
//! question kind are judged incorrect, never reported as errors.

use crate::bank::QuestionBank;
use crate::model::{Answer, AnswerValue, GradingResult, QuestionKind, Verdict};

impl QuestionKind {
    /// Whether `value` matches this kind's answer key.
    pub fn is_correct(&self, value: &AnswerValue) -> bool {
        match (self, value) {
            (QuestionKind::SingleChoice { correct_index, .. }, AnswerValue::Index(i)) => {
                usize::try_from(*i).is_ok_and(|i| i == *correct_index)
            }
            (QuestionKind::MultiChoice { correct_indexes, .. }, AnswerValue::Indices(given)) => {
                same_indexes(given, correct_indexes)
            }
            (QuestionKind::Text { correct_text }, AnswerValue::Text(given)) => {
                text_matches(given, correct_text)
            }
            _ => false,
        }
    }
}

/// Order-independent comparison; lengths must agree.
fn same_indexes(given: &[i64], correct: &[usize]) -> bool {
    if given.len() != correct.len() {
        return false;
    }
    let mut given: Vec<i64> = given.to_vec();
    let mut correct: Vec<i64> = correct.iter().map(|&i| i as i64).collect();
    given.sort_unstable();
    correct.sort_unstable();
    given == correct
}

/// Trimmed, case-insensitive equality. An empty key matches nothing.
fn text_matches(given: &str, correct: &str) -> bool {
    if correct.is_empty() {
        return false;
    }
    given.trim().to_lowercase() == correct.trim().to_lowercase()
}

/// Grade `answers` against `bank`.
///
/// Verdicts follow submission order. `total` is the bank size, so questions
/// left unanswered lower the percentage without appearing in the verdicts.
pub fn grade(answers: &[Answer], bank: &QuestionBank) -> GradingResult {
    let mut score = 0;
    let per_question: Vec<Verdict> = answers
        .iter()
        .map(|answer| {
            let correct = bank
                .by_id(&answer.id)
                .is_some_and(|q| q.kind.is_correct(&answer.value));
            if correct {
                score += 1;
            }
            Verdict {
                id: answer.id.clone(),
                correct,
            }
        })
        .collect();

    tracing::debug!(
        answers = answers.len(),
        score,
        total = bank.len(),
        "graded submission"
    );

    GradingResult {
        score,
        total: bank.len(),
        per_question,
    }
}

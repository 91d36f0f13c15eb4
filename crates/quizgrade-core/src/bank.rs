//! The question bank: an immutable, id-indexed sequence of questions.

use std::collections::HashMap;

use crate::error::BankError;
use crate::model::{Question, QuestionId};

/// Number of questions the default quiz exposes.
pub const DEFAULT_QUIZ_SIZE: usize = 12;

/// Immutable ordered collection of questions with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Build a bank, indexing questions by id.
    ///
    /// Every question is validated first, so a hand-built question with an
    /// out-of-range correct index is rejected just like a parsed one.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut index = HashMap::with_capacity(questions.len());
        for (pos, question) in questions.iter().enumerate() {
            question.validate()?;
            if index.insert(question.id.clone(), pos).is_some() {
                return Err(BankError::DuplicateId(question.id.clone()));
            }
        }
        Ok(Self { questions, index })
    }

    /// The built-in general computing quiz.
    pub fn builtin() -> Self {
        let questions = vec![
            Question::single_choice(
                1,
                "What is the capital of France?",
                &["London", "Berlin", "Paris", "Madrid"],
                2,
            ),
            Question::multi_choice(
                2,
                "Which of the following are programming languages? (Select all that apply)",
                &["JavaScript", "HTML", "Python", "CSS"],
                &[0, 2],
            ),
            Question::text(3, "What does CPU stand for?", "Central Processing Unit"),
            Question::single_choice(
                4,
                "Which HTTP method is used to create a new resource?",
                &["GET", "POST", "PUT", "DELETE"],
                1,
            ),
            Question::multi_choice(
                5,
                "Which of these are JavaScript frameworks? (Select all that apply)",
                &["React", "Vue", "Angular", "Django"],
                &[0, 1, 2],
            ),
            Question::text(6, "What is the main purpose of CSS?", "Styling web pages"),
            Question::single_choice(
                7,
                "What is the result of 2 + 2 * 3?",
                &["8", "10", "12", "6"],
                0,
            ),
            Question::multi_choice(
                8,
                "Which data structures are commonly used in programming? (Select all that apply)",
                &["Array", "Object", "String", "Number"],
                &[0, 1],
            ),
            Question::text(9, "What does API stand for?", "Application Programming Interface"),
            Question::single_choice(
                10,
                "Which of the following is a NoSQL database?",
                &["MySQL", "PostgreSQL", "MongoDB", "SQLite"],
                2,
            ),
            Question::multi_choice(
                11,
                "Which are valid JavaScript variable declaration keywords? (Select all that apply)",
                &["var", "let", "const", "def"],
                &[0, 1, 2],
            ),
            Question::text(
                12,
                "What is the time complexity of binary search?",
                "O(log n)",
            ),
        ];
        let index = questions
            .iter()
            .enumerate()
            .map(|(pos, q)| (q.id.clone(), pos))
            .collect();
        Self { questions, index }
    }

    /// All questions, in bank order.
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// The first `n` questions (or all of them if the bank is smaller).
    pub fn take(&self, n: usize) -> &[Question] {
        &self.questions[..n.min(self.questions.len())]
    }

    /// Look up a question by id.
    pub fn by_id(&self, id: &QuestionId) -> Option<&Question> {
        self.index.get(id).map(|&pos| &self.questions[pos])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

use axum::{Extension, Json};
use serde::Serialize;
use tracing::instrument;

use quizgrade_core::Question;

use crate::app::AppState;

/// Body of `GET /api/quiz`.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<Question>,
    pub total: usize,
}

#[instrument(skip_all)]
pub(crate) async fn get_quiz(Extension(state): Extension<AppState>) -> Json<QuizResponse> {
    let questions = state.bank.take(state.quiz_size).to_vec();
    let total = questions.len();
    tracing::debug!(total, "serving quiz");
    Json(QuizResponse { questions, total })
}

use axum::body::Bytes;
use axum::{Extension, Json};
use tracing::instrument;

use quizgrade_core::{grade, GradingResult};

use crate::app::AppState;
use crate::error::ApiError;
use crate::submission::parse_submission;

#[instrument(skip_all)]
pub(crate) async fn grade_answers(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<GradingResult>, ApiError> {
    let answers = parse_submission(&body)?;
    let result = grade(&answers, &state.bank);
    tracing::info!(
        answers = answers.len(),
        score = result.score,
        total = result.total,
        "graded submission"
    );
    Ok(Json(result))
}

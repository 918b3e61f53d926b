use axum::{Json, extract::State};
use tracing::instrument;
use trivia_core::{AppError, ErrorResponse};

use crate::modules::quizzes::model::{QuizRequest, QuizResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Serve the next question of a quiz round, or `null` when the round is over.
#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question, or null when exhausted", body = QuizResponse),
        (status = 400, description = "Malformed quiz request", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Quizzes"
)]
#[instrument(skip(state))]
pub async fn play_quiz(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let question = state
        .quizzes
        .next_question(request.quiz_category.id, &request.previous_questions)
        .await?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

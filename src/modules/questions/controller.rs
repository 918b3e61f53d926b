use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use trivia_core::{AppError, ErrorResponse, PageParams};
use trivia_models::QuestionId;

use crate::modules::questions::model::{
    CreatedQuestionResponse, DeletedQuestionResponse, QuestionsRequest, QuestionsResponse,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/questions",
    params(PageParams),
    responses(
        (status = 200, description = "One page of questions with the category map", body = QuestionsResponse),
        (status = 404, description = "Page beyond the last page", body = ErrorResponse)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_questions(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let page = state.questions.list_questions(&params).await?;
    let categories = state.categories.category_map().await?;

    Ok(Json(
        QuestionsResponse::new(page, None).with_categories(categories),
    ))
}

/// Search questions by `searchTerm`, or create a question when the body
/// carries `question`, `answer`, `category` and `difficulty` instead.
#[utoipa::path(
    post,
    path = "/questions",
    params(PageParams),
    request_body = QuestionsRequest,
    responses(
        (status = 200, description = "Search results", body = QuestionsResponse),
        (status = 201, description = "Question created", body = CreatedQuestionResponse),
        (status = 400, description = "Missing, blank, or invalid fields", body = ErrorResponse)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn post_questions(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
    ValidatedJson(request): ValidatedJson<QuestionsRequest>,
) -> Result<Response, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    match request {
        QuestionsRequest::Search(dto) => {
            let page = state
                .questions
                .search_questions(&dto.search_term, &params)
                .await?;

            Ok(Json(QuestionsResponse::new(page, None)).into_response())
        }
        QuestionsRequest::Create(dto) => {
            let (created, page) = state.questions.create_question(dto, &params).await?;

            let body = CreatedQuestionResponse {
                success: true,
                created,
                questions: page.questions,
                total_questions: page.total_questions,
                current_category: None,
            };

            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(
        ("id" = i32, Path, description = "Question ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Question deleted", body = DeletedQuestionResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Question could not be deleted", body = ErrorResponse)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<QuestionId>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<DeletedQuestionResponse>, AppError> {
    let Path(id) =
        id.map_err(|e| AppError::not_found(anyhow::anyhow!("Invalid question id: {}", e)))?;
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let page = state.questions.delete_question(id, &params).await?;

    Ok(Json(DeletedQuestionResponse {
        success: true,
        deleted: id,
        questions: page.questions,
        total_questions: page.total_questions,
    }))
}

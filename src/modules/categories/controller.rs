use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use tracing::instrument;
use trivia_core::{AppError, ErrorResponse, PageParams};
use trivia_models::CategoryId;

use crate::modules::categories::model::CategoriesResponse;
use crate::modules::questions::model::QuestionsResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories keyed by id", body = CategoriesResponse),
        (status = 404, description = "Categories could not be read", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.categories.category_map().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// One page of the questions filed under a category.
#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    params(
        ("id" = i32, Path, description = "Category ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Questions in the category", body = QuestionsResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_questions_by_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Path(id) =
        id.map_err(|e| AppError::not_found(anyhow::anyhow!("Invalid category id: {}", e)))?;
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let (category, page) = state.questions.list_by_category(id, &params).await?;

    Ok(Json(QuestionsResponse::new(page, Some(category.kind))))
}

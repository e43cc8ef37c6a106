//! Axum route handlers for the Recommendation API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::recommend::generator::{recommend_projects, RecommendRequest, RecommendResponse};
use crate::state::AppState;

/// POST /api/v1/projects/recommendations
///
/// Fetches the career path, asks the model for three projects, and repairs
/// whatever comes back. Once the input is valid and the career path exists,
/// the response always carries exactly three projects.
pub async fn handle_recommend(
    State(state): State<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) =
        body.map_err(|_| AppError::Validation("Invalid JSON input".to_string()))?;

    let response =
        recommend_projects(state.store.as_ref(), state.llm.as_ref(), request).await?;

    Ok(Json(response))
}

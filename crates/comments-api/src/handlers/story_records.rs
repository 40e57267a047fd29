//! Story record handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use comments_service::StoryRecordViewModel;

use crate::dto::request::StoryRecordParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/storyRecords/get?startDate&endDate&commentId&count
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<StoryRecordParams>,
) -> Result<Json<ApiResponse<Vec<StoryRecordViewModel>>>, ApiError> {
    params.validate()?;
    let usage = state.story_record_service.get(&params.into()).await?;
    Ok(Json(ApiResponse::ok(usage)))
}

//! Comment handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use comments_entity::{CommentModel, IncompleteCommentData};

use crate::dto::request::{AddCommentRequest, CommentIds, UpdateCommentRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/comments/add
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddCommentRequest>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    req.validate()?;
    let id = state.comment_service.add(req.into()).await?;
    Ok(Json(ApiResponse::ok(id)))
}

/// GET /api/comments/getAll
pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CommentModel>>>, ApiError> {
    let comments = state.comment_service.get_all().await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// GET /api/comments/get/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CommentModel>>, ApiError> {
    let comment = state.comment_service.get(id).await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// GET /api/comments/description/{id}
pub async fn description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let description = state.comment_service.get_description(id).await?;
    Ok(Json(ApiResponse::ok(description)))
}

/// POST /api/comments/increment
pub async fn increment(
    State(state): State<AppState>,
    Json(comment_id): Json<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.comment_service.increment(comment_id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/comments/update
pub async fn update(
    State(state): State<AppState>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    req.validate()?;
    state.comment_service.update(req.into()).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/comments/delete
pub async fn delete(
    State(state): State<AppState>,
    Json(ids): Json<CommentIds>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let deleted = state.comment_service.delete(&ids.into_vec()).await?;
    Ok(Json(ApiResponse::ok(deleted)))
}

/// GET /api/comments/getIncomplete
pub async fn get_incomplete(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<IncompleteCommentData>>>, ApiError> {
    let comments = state.comment_service.get_incomplete().await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /api/comments/updateIncomplete
pub async fn update_incomplete(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let updated = state.comment_service.update_incomplete().await?;
    Ok(Json(ApiResponse::ok(updated)))
}

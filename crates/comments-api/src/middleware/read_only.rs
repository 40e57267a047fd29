//! Read-only mode guard for mutating routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use comments_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with 403 while `comments.read_only` is set.
pub async fn reject_when_read_only(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.config.comments.read_only {
        warn!(path = %request.uri().path(), "Write rejected in read-only mode");
        return Err(AppError::read_only("Comments are read-only").into());
    }
    Ok(next.run(request).await)
}

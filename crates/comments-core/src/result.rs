//! Convenience result type alias for GitLab Comments.

use crate::error::AppError;

/// A specialized `Result` type for GitLab Comments operations.
pub type AppResult<T> = Result<T, AppError>;

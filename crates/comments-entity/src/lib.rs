//! # comments-entity
//!
//! Entity models for GitLab Comments. Every entity struct represents a
//! table row and declares its table and column metadata as constants;
//! projections declare the subset of columns (and derived columns) they
//! read. All types derive `sqlx::FromRow`.

pub mod comment;
pub mod story_record;

pub use comment::{Comment, CommentChanges, CommentModel, IncompleteCommentData};
pub use story_record::{StoryRecord, StoryRecordReadModel};

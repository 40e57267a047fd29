//! # comments-service
//!
//! Business logic for GitLab Comments. Services validate requests, turn
//! them into provider calls and translate missing rows into domain errors.
//!
//! Services take their adapter through an `Arc` at construction time and
//! are generic over it, so tests can run them on the mock adapter.

pub mod comment;
pub mod story_record;

pub use comment::{AddCommentModel, CommentService, UpdateCommentModel, format_number};
pub use story_record::{StoryRecordQuery, StoryRecordService, StoryRecordViewModel};

//! Comment domain entities.

pub mod changes;
pub mod model;
pub mod projection;

pub use changes::CommentChanges;
pub use model::Comment;
pub use projection::{CommentModel, IncompleteCommentData};

//! Comment management.

pub mod model;
pub mod number;
pub mod service;

pub use model::{AddCommentModel, UpdateCommentModel};
pub use number::format_number;
pub use service::CommentService;

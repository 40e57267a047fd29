//! Request handlers organized by resource.

pub mod comments;
pub mod health;
pub mod story_records;

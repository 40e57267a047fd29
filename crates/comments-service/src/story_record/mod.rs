//! Comment usage history.

pub mod service;

pub use service::{StoryRecordQuery, StoryRecordService, StoryRecordViewModel};

//! Story records: one row per reuse of a comment.

pub mod model;
pub mod projection;

pub use model::StoryRecord;
pub use projection::StoryRecordReadModel;

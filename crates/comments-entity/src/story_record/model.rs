//! Story record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use comments_core::traits::{ColumnDef, Entity, Projection};
use comments_core::types::{ColumnKind, SqlValue};

/// One recorded use of a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoryRecord {
    /// Record identifier.
    pub id: Uuid,
    /// When the comment was used.
    pub created_on: DateTime<Utc>,
    /// The comment that was used.
    pub comment_id: Uuid,
    /// Set when the record comes from an increment of the appearance count.
    pub is_increment_action: bool,
}

impl StoryRecord {
    /// A new record of an increment of `comment_id`.
    pub fn increment(comment_id: Uuid) -> Self {
        Self {
            id: Uuid::nil(),
            created_on: Utc::now(),
            comment_id,
            is_increment_action: true,
        }
    }
}

impl Projection for StoryRecord {
    const COLUMNS: &'static [&'static str] =
        &["id", "created_on", "comment_id", "is_increment_action"];
}

impl Entity for StoryRecord {
    const TABLE: &'static str = "story_records";

    const FIELDS: &'static [ColumnDef] = &[
        ColumnDef::identity("Id", "id", ColumnKind::Uuid),
        ColumnDef::generated("CreatedOn", "created_on", ColumnKind::Timestamp),
        ColumnDef::new("CommentId", "comment_id", ColumnKind::Uuid),
        ColumnDef::new("IsIncrementAction", "is_increment_action", ColumnKind::Boolean),
    ];

    fn value(&self, field: &str) -> Option<SqlValue> {
        match field {
            "Id" => Some(self.id.into()),
            "CreatedOn" => Some(self.created_on.into()),
            "CommentId" => Some(self.comment_id.into()),
            "IsIncrementAction" => Some(self.is_increment_action.into()),
            _ => None,
        }
    }
}

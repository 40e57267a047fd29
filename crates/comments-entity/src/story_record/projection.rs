//! Read models selected from the `story_records` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use comments_core::traits::{DerivedColumn, DerivedExpression, Projection};

/// A story record joined with the text of its comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecordReadModel {
    /// The comment that was used.
    pub comment_id: Uuid,
    /// Message of the comment; `None` if the comment is gone.
    pub comment_text: Option<String>,
}

impl Projection for StoryRecordReadModel {
    const COLUMNS: &'static [&'static str] = &["comment_id"];

    const DERIVED: &'static [DerivedColumn] = &[DerivedColumn {
        alias: "comment_text",
        expression: DerivedExpression::Lookup {
            foreign_key: "comment_id",
            table: "comments",
            key: "id",
            column: "message",
        },
    }];
}

//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use comments_core::traits::{ColumnDef, Entity, Projection};
use comments_core::types::{ColumnKind, SqlValue};

/// A reusable review comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// When the comment was created.
    pub created_on: DateTime<Utc>,
    /// Comment text posted in reviews.
    pub message: String,
    /// Variant of the message carrying a link to the rule it enforces.
    pub comment_with_link_to_rule: Option<String>,
    /// Longer explanation for reviewers.
    pub description: Option<String>,
    /// How many times the comment has been used.
    pub appearance_count: i64,
    /// Human-facing number, empty until assigned.
    pub number: String,
}

impl Comment {
    /// A new, not yet persisted comment used once.
    pub fn new(message: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            created_on: Utc::now(),
            message: message.into(),
            comment_with_link_to_rule: None,
            description: None,
            appearance_count: 1,
            number: number.into(),
        }
    }
}

impl Projection for Comment {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_on",
        "message",
        "comment_with_link_to_rule",
        "description",
        "appearance_count",
        "number",
    ];
}

impl Entity for Comment {
    const TABLE: &'static str = "comments";

    const FIELDS: &'static [ColumnDef] = &[
        ColumnDef::identity("Id", "id", ColumnKind::Uuid),
        ColumnDef::generated("CreatedOn", "created_on", ColumnKind::Timestamp),
        ColumnDef::new("Message", "message", ColumnKind::Text),
        ColumnDef::new(
            "CommentWithLinkToRule",
            "comment_with_link_to_rule",
            ColumnKind::Text,
        ),
        ColumnDef::new("Description", "description", ColumnKind::Text),
        ColumnDef::new("AppearanceCount", "appearance_count", ColumnKind::Integer),
        ColumnDef::new("Number", "number", ColumnKind::Text),
    ];

    fn value(&self, field: &str) -> Option<SqlValue> {
        let value = match field {
            "Id" => self.id.into(),
            "CreatedOn" => self.created_on.into(),
            "Message" => self.message.as_str().into(),
            "CommentWithLinkToRule" => {
                SqlValue::nullable(self.comment_with_link_to_rule.clone(), ColumnKind::Text)
            }
            "Description" => SqlValue::nullable(self.description.clone(), ColumnKind::Text),
            "AppearanceCount" => self.appearance_count.into(),
            "Number" => self.number.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

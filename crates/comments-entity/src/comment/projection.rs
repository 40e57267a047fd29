//! Read models selected from the `comments` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use comments_core::traits::Projection;

/// Comment as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommentModel {
    /// Comment identifier.
    pub id: Uuid,
    /// Comment text.
    pub message: String,
    /// Message variant linking to the rule.
    pub comment_with_link_to_rule: Option<String>,
    /// Longer explanation.
    pub description: Option<String>,
    /// Times used.
    pub appearance_count: i64,
    /// Human-facing number.
    pub number: String,
}

impl Projection for CommentModel {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "message",
        "comment_with_link_to_rule",
        "description",
        "appearance_count",
        "number",
    ];
}

/// A comment that has not been given a number yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteCommentData {
    /// Comment identifier.
    pub id: Uuid,
    /// Comment text.
    pub message: String,
    /// Always empty for incomplete comments.
    pub number: String,
}

impl Projection for IncompleteCommentData {
    const COLUMNS: &'static [&'static str] = &["id", "message", "number"];
}

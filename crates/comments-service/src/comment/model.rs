//! Comment request models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Values of a new comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentModel {
    /// Comment text; required.
    pub message: String,
    /// Message variant with a link to the rule.
    #[serde(default)]
    pub comment_with_link_to_rule: Option<String>,
    /// Longer explanation.
    #[serde(default)]
    pub description: Option<String>,
}

/// New values of an existing comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentModel {
    /// Comment to update.
    pub id: Uuid,
    /// New text; required.
    pub message: String,
    /// New link variant; ignored when empty.
    #[serde(default)]
    pub comment_with_link_to_rule: Option<String>,
    /// New description; ignored when empty.
    #[serde(default)]
    pub description: Option<String>,
}

/// `Some` only for non-blank text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

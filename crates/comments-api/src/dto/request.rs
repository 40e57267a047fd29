//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use comments_service::{AddCommentModel, StoryRecordQuery, UpdateCommentModel};

/// Add comment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Comment text.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Message with a link to the rule.
    #[serde(default)]
    pub comment_with_link_to_rule: Option<String>,
    /// Longer explanation.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<AddCommentRequest> for AddCommentModel {
    fn from(req: AddCommentRequest) -> Self {
        Self {
            message: req.message,
            comment_with_link_to_rule: req.comment_with_link_to_rule,
            description: req.description,
        }
    }
}

/// Update comment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    /// Comment to update.
    pub id: Uuid,
    /// New text.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// New link variant.
    #[serde(default)]
    pub comment_with_link_to_rule: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateCommentRequest> for UpdateCommentModel {
    fn from(req: UpdateCommentRequest) -> Self {
        Self {
            id: req.id,
            message: req.message,
            comment_with_link_to_rule: req.comment_with_link_to_rule,
            description: req.description,
        }
    }
}

/// Delete request body: one ID or a list of IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentIds {
    /// A single comment.
    One(Uuid),
    /// Several comments.
    Many(Vec<Uuid>),
}

impl CommentIds {
    /// The IDs as a list.
    pub fn into_vec(self) -> Vec<Uuid> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}

/// Query string of `GET /api/storyRecords/get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_range"))]
pub struct StoryRecordParams {
    /// Earliest record time.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest record time.
    pub end_date: Option<DateTime<Utc>>,
    /// Only this comment.
    pub comment_id: Option<Uuid>,
    /// Maximum number of comments returned.
    #[validate(range(min = 1, message = "count must be positive"))]
    pub count: Option<usize>,
}

fn validate_range(params: &StoryRecordParams) -> Result<(), ValidationError> {
    match (params.start_date, params.end_date) {
        (Some(start), Some(end)) if start > end => {
            let mut error = ValidationError::new("date_range");
            error.message = Some("startDate must not be after endDate".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

impl From<StoryRecordParams> for StoryRecordQuery {
    fn from(params: StoryRecordParams) -> Self {
        Self {
            start_date: params.start_date,
            end_date: params.end_date,
            comment_id: params.comment_id,
            count: params.count,
        }
    }
}

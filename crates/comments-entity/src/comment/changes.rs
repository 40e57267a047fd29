//! Partial updates of a comment.

use comments_core::traits::{Changeset, FieldChange};
use comments_core::types::SqlValue;

use super::model::Comment;

/// Fields of a comment to change; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentChanges {
    /// New message.
    pub message: Option<String>,
    /// New linked message.
    pub comment_with_link_to_rule: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New number.
    pub number: Option<String>,
    /// Amount added to the appearance count by the store.
    pub appearance_increment: Option<i64>,
}

impl CommentChanges {
    /// Increment the appearance count by one.
    pub fn increment() -> Self {
        Self {
            appearance_increment: Some(1),
            ..Self::default()
        }
    }

    /// Assign a number.
    pub fn number(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            ..Self::default()
        }
    }
}

impl Changeset<Comment> for CommentChanges {
    fn changes(&self) -> Vec<(&'static str, FieldChange)> {
        let mut changes = Vec::new();
        let texts = [
            ("Message", &self.message),
            ("CommentWithLinkToRule", &self.comment_with_link_to_rule),
            ("Description", &self.description),
            ("Number", &self.number),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                changes.push((field, FieldChange::Assign(SqlValue::Text(value.clone()))));
            }
        }
        if let Some(delta) = self.appearance_increment {
            changes.push(("AppearanceCount", FieldChange::Increment(delta)));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_supplied_fields() {
        let changes = CommentChanges {
            message: Some("New".to_string()),
            description: Some("Why".to_string()),
            ..CommentChanges::default()
        };

        let fields: Vec<_> = changes.changes().into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["Message", "Description"]);
    }

    #[test]
    fn test_increment() {
        assert_eq!(
            CommentChanges::increment().changes(),
            vec![("AppearanceCount", FieldChange::Increment(1))]
        );
    }

    #[test]
    fn test_empty() {
        assert!(CommentChanges::default().changes().is_empty());
    }
}

//! Comment CRUD, numbering and usage counting.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use comments_core::config::CommentsConfig;
use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::traits::DataProvider;
use comments_core::types::{ComparisonOperator, FilterGroup, FilterItem, SelectConfiguration};
use comments_database::adapter::{DbAdapter, PgAdapter};
use comments_database::provider::SqlDataProvider;
use comments_database::repositories::{LAST_COMMENT_NUMBER, SystemVariableRepository};
use comments_entity::{
    Comment, CommentChanges, CommentModel, IncompleteCommentData, StoryRecord,
};

use super::model::{AddCommentModel, UpdateCommentModel, non_blank};
use super::number::format_number;

/// Manages comments and their appearance counts.
pub struct CommentService<A = PgAdapter> {
    /// Comments table.
    comments: SqlDataProvider<Comment, A>,
    /// Story records table.
    story_records: SqlDataProvider<StoryRecord, A>,
    /// Numbering counter.
    variables: SystemVariableRepository<A>,
    /// Template for new comment numbers.
    number_template: String,
}

impl<A> Clone for CommentService<A> {
    fn clone(&self) -> Self {
        Self {
            comments: self.comments.clone(),
            story_records: self.story_records.clone(),
            variables: self.variables.clone(),
            number_template: self.number_template.clone(),
        }
    }
}

impl<A: DbAdapter> CommentService<A> {
    /// Creates a comment service.
    pub fn new(adapter: Arc<A>, config: &CommentsConfig) -> Self {
        Self {
            comments: SqlDataProvider::new(Arc::clone(&adapter)),
            story_records: SqlDataProvider::new(Arc::clone(&adapter)),
            variables: SystemVariableRepository::new(adapter),
            number_template: config.number_template.clone(),
        }
    }

    /// Adds a comment used once and returns its identifier.
    pub async fn add(&self, model: AddCommentModel) -> AppResult<Uuid> {
        let message = required_message(&model.message)?;
        let number = self.next_number().await?;

        let mut comment = Comment::new(message, number);
        comment.comment_with_link_to_rule = non_blank(model.comment_with_link_to_rule.as_deref());
        comment.description = non_blank(model.description.as_deref());

        let id = self.comments.add(&comment).await?;
        info!(comment_id = %id, number = %comment.number, "Comment added");
        Ok(id)
    }

    /// Lists every comment, most used first.
    pub async fn get_all(&self) -> AppResult<Vec<CommentModel>> {
        let mut comments: Vec<CommentModel> =
            self.comments.select(&SelectConfiguration::default()).await?;
        comments.sort_by(|a, b| b.appearance_count.cmp(&a.appearance_count));
        Ok(comments)
    }

    /// Gets a comment by ID.
    pub async fn get(&self, comment_id: Uuid) -> AppResult<CommentModel> {
        require_id(comment_id)?;
        let filter = FilterGroup::and("ById").with(FilterItem::eq("Id", comment_id));

        let comments: Vec<CommentModel> = self
            .comments
            .select(&SelectConfiguration::filtered(filter))
            .await?;
        comments
            .into_iter()
            .next()
            .ok_or_else(|| AppError::entity_not_found("Comment", comment_id))
    }

    /// Gets the description of a comment; empty when it has none.
    pub async fn get_description(&self, comment_id: Uuid) -> AppResult<String> {
        Ok(self.get(comment_id).await?.description.unwrap_or_default())
    }

    /// Updates the text of a comment.
    ///
    /// The message is always written. The description and link are only
    /// written when non-blank, so omitting them keeps the stored values.
    pub async fn update(&self, model: UpdateCommentModel) -> AppResult<()> {
        let message = required_message(&model.message)?;
        self.ensure_exists(model.id).await?;

        let changes = CommentChanges {
            message: Some(message.to_string()),
            comment_with_link_to_rule: non_blank(model.comment_with_link_to_rule.as_deref()),
            description: non_blank(model.description.as_deref()),
            ..CommentChanges::default()
        };
        if self.comments.update(model.id, &changes).await? == 0 {
            return Err(AppError::entity_not_found("Comment", model.id));
        }

        info!(comment_id = %model.id, "Comment updated");
        Ok(())
    }

    /// Counts one more use of a comment and records it in the story.
    pub async fn increment(&self, comment_id: Uuid) -> AppResult<()> {
        self.ensure_exists(comment_id).await?;

        if self
            .comments
            .update(comment_id, &CommentChanges::increment())
            .await?
            == 0
        {
            return Err(AppError::entity_not_found("Comment", comment_id));
        }
        self.story_records
            .add(&StoryRecord::increment(comment_id))
            .await?;

        info!(comment_id = %comment_id, "Comment incremented");
        Ok(())
    }

    /// Deletes comments. Nil IDs are ignored. Returns the number deleted.
    pub async fn delete(&self, comment_ids: &[Uuid]) -> AppResult<u64> {
        let ids: Vec<Uuid> = comment_ids
            .iter()
            .copied()
            .filter(|id| !id.is_nil())
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self.comments.delete(&ids).await?;
        info!(requested = ids.len(), deleted, "Comments deleted");
        Ok(deleted)
    }

    /// Lists comments that have no number yet.
    pub async fn get_incomplete(&self) -> AppResult<Vec<IncompleteCommentData>> {
        let filter = FilterGroup::and("Incomplete").with(FilterItem::new(
            "EmptyNumber",
            "Number",
            ComparisonOperator::Equal,
            "",
        ));
        self.comments
            .select(&SelectConfiguration::filtered(filter))
            .await
    }

    /// Numbers every incomplete comment. Returns how many were numbered.
    pub async fn update_incomplete(&self) -> AppResult<u64> {
        let incomplete = self.get_incomplete().await?;
        let mut numbered = 0;

        for comment in incomplete {
            let number = self.next_number().await?;
            let affected = self
                .comments
                .update(comment.id, &CommentChanges::number(number.clone()))
                .await?;
            if affected == 0 {
                warn!(comment_id = %comment.id, "Incomplete comment disappeared before numbering");
                continue;
            }
            info!(comment_id = %comment.id, number = %number, "Comment numbered");
            numbered += affected;
        }

        Ok(numbered)
    }

    async fn next_number(&self) -> AppResult<String> {
        let value = self.variables.increment_value(LAST_COMMENT_NUMBER).await?;
        format_number(&self.number_template, value)
    }

    async fn ensure_exists(&self, comment_id: Uuid) -> AppResult<Comment> {
        require_id(comment_id)?;
        self.comments
            .get(comment_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Comment", comment_id))
    }
}

fn require_id(comment_id: Uuid) -> AppResult<()> {
    if comment_id.is_nil() {
        return Err(AppError::validation("Comment id is required"));
    }
    Ok(())
}

fn required_message(message: &str) -> AppResult<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::validation("Message is required"));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use comments_core::error::ErrorKind;
    use comments_core::types::{ColumnKind, SqlValue};
    use comments_database::MockAdapter;
    use comments_database::provider::InsertedId;
    use comments_database::repositories::VariableValue;

    use super::*;

    fn service() -> (Arc<MockAdapter>, CommentService<MockAdapter>) {
        let adapter = Arc::new(MockAdapter::new());
        let config = CommentsConfig {
            number_template: "!{0:000}".to_string(),
            read_only: false,
        };
        (Arc::clone(&adapter), CommentService::new(adapter, &config))
    }

    fn stored(id: Uuid) -> Comment {
        Comment {
            id,
            created_on: Utc::now(),
            message: "Stored".to_string(),
            comment_with_link_to_rule: None,
            description: Some("Because".to_string()),
            appearance_count: 1,
            number: "!001".to_string(),
        }
    }

    fn listed(count: i64) -> CommentModel {
        CommentModel {
            id: Uuid::new_v4(),
            message: format!("Comment {count}"),
            comment_with_link_to_rule: None,
            description: None,
            appearance_count: count,
            number: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_numbers_the_comment() {
        let (adapter, service) = service();
        let id = Uuid::new_v4();
        adapter.push_rows(vec![VariableValue { value: 7 }]);
        adapter.push_rows(vec![InsertedId { id }]);

        let added = service
            .add(AddCommentModel {
                message: "  Use guard clauses ".to_string(),
                comment_with_link_to_rule: None,
                description: Some("   ".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(added, id);

        let statements = adapter.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].sql.starts_with("UPDATE system_variables"));

        let insert = &statements[1];
        assert!(insert.sql.starts_with("INSERT INTO comments"));
        assert_eq!(
            insert.parameters.get("Message_1"),
            Some(&SqlValue::Text("Use guard clauses".into()))
        );
        assert_eq!(
            insert.parameters.get("Description_3"),
            Some(&SqlValue::Null(ColumnKind::Text))
        );
        assert_eq!(
            insert.parameters.get("Number_5"),
            Some(&SqlValue::Text("!007".into()))
        );
    }

    #[tokio::test]
    async fn test_add_requires_message() {
        let (adapter, service) = service();

        let err = service.add(AddCommentModel::default()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(adapter.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_all_is_ordered_by_appearance_count() {
        let (adapter, service) = service();
        adapter.push_rows(vec![listed(1), listed(5), listed(3)]);

        let counts: Vec<_> = service
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.appearance_count)
            .collect();
        assert_eq!(counts, vec![5, 3, 1]);
    }

    #[tokio::test]
    async fn test_get_missing_comment() {
        let (adapter, service) = service();

        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = service.get(Uuid::nil()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_description_defaults_to_empty() {
        let (adapter, service) = service();
        adapter.push_rows(vec![listed(2)]);

        assert_eq!(service.get_description(Uuid::new_v4()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_update_checks_existence_first() {
        let (adapter, service) = service();

        let err = service
            .update(UpdateCommentModel {
                id: Uuid::new_v4(),
                message: "New".to_string(),
                ..UpdateCommentModel::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_update_skips_blank_optional_fields() {
        let (adapter, service) = service();
        let id = Uuid::new_v4();
        adapter.push_rows(vec![stored(id)]);

        service
            .update(UpdateCommentModel {
                id,
                message: "New".to_string(),
                comment_with_link_to_rule: Some(String::new()),
                description: None,
            })
            .await
            .unwrap();

        let update = adapter.last_statement().unwrap();
        assert_eq!(
            update.sql,
            "UPDATE comments SET message = @Message_1 WHERE id = @Id_2"
        );
    }

    #[tokio::test]
    async fn test_increment_is_atomic_and_recorded() {
        let (adapter, service) = service();
        let id = Uuid::new_v4();
        adapter.push_rows(vec![stored(id)]);
        adapter.push_rows(vec![InsertedId { id: Uuid::new_v4() }]);

        service.increment(id).await.unwrap();

        let statements = adapter.statements();
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[1].sql,
            "UPDATE comments SET appearance_count = appearance_count + @AppearanceCount_1 \
             WHERE id = @Id_2"
        );
        assert!(statements[2].sql.starts_with("INSERT INTO story_records"));
        assert_eq!(
            statements[2].parameters.get("CommentId_1"),
            Some(&SqlValue::Uuid(id))
        );
        assert_eq!(
            statements[2].parameters.get("IsIncrementAction_2"),
            Some(&SqlValue::Boolean(true))
        );
    }

    #[tokio::test]
    async fn test_increment_missing_comment_writes_nothing() {
        let (adapter, service) = service();

        let err = service.increment(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_ignores_nil_ids() {
        let (adapter, service) = service();
        let id = Uuid::new_v4();

        assert_eq!(service.delete(&[Uuid::nil()]).await.unwrap(), 0);
        assert_eq!(adapter.calls(), 0);

        assert_eq!(service.delete(&[Uuid::nil(), id]).await.unwrap(), 1);
        let delete = adapter.last_statement().unwrap();
        assert_eq!(delete.sql, "DELETE FROM comments WHERE id IN (@Id_1)");
        assert_eq!(delete.parameters.get("Id_1"), Some(&SqlValue::Uuid(id)));
    }

    #[tokio::test]
    async fn test_incomplete_comments_filter_on_empty_number() {
        let (adapter, service) = service();

        assert!(service.get_incomplete().await.unwrap().is_empty());
        let select = adapter.last_statement().unwrap();
        assert_eq!(
            select.sql,
            "SELECT id, message, number FROM comments WHERE number = @EmptyNumber_1"
        );
        assert_eq!(
            select.parameters.get("EmptyNumber_1"),
            Some(&SqlValue::Text(String::new()))
        );
    }

    #[tokio::test]
    async fn test_update_incomplete_numbers_each_comment() {
        let (adapter, service) = service();
        let incomplete: Vec<_> = (0..2)
            .map(|_| IncompleteCommentData {
                id: Uuid::new_v4(),
                message: "Unnumbered".to_string(),
                number: String::new(),
            })
            .collect();
        adapter.push_rows(incomplete);
        adapter.push_rows(vec![VariableValue { value: 11 }]);
        adapter.push_rows(vec![VariableValue { value: 12 }]);

        assert_eq!(service.update_incomplete().await.unwrap(), 2);

        let last = adapter.last_statement().unwrap();
        assert_eq!(last.sql, "UPDATE comments SET number = @Number_1 WHERE id = @Id_2");
        assert_eq!(
            last.parameters.get("Number_1"),
            Some(&SqlValue::Text("!012".into()))
        );
    }
}

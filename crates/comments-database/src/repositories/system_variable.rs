//! System variable repository.
//!
//! System variables are named integer counters in `system_variables`.

use std::sync::Arc;

use sqlx::FromRow;
use tracing::debug;

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::types::SqlValue;

use crate::adapter::{DbAdapter, PgAdapter};
use crate::statement::{ParameterMap, Statement};

/// Number of the most recently numbered comment.
pub const LAST_COMMENT_NUMBER: &str = "LastCommentNumber";

/// Row returned when reading a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct VariableValue {
    /// Current value.
    pub value: i64,
}

/// Reads and advances system variables.
pub struct SystemVariableRepository<A = PgAdapter> {
    adapter: Arc<A>,
}

impl<A> Clone for SystemVariableRepository<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<A: DbAdapter> SystemVariableRepository<A> {
    /// Create a repository on `adapter`.
    pub fn new(adapter: Arc<A>) -> Self {
        Self { adapter }
    }

    /// Current value of `name`.
    pub async fn get_value(&self, name: &str) -> AppResult<i64> {
        let statement = by_name("SELECT value FROM system_variables WHERE name = @Name_1", name)?;
        let rows: Vec<VariableValue> = self
            .adapter
            .query(&statement)
            .await
            .map_err(|e| e.context(format!("system variable '{name}' get")))?;

        rows.first()
            .map(|row| row.value)
            .ok_or_else(|| AppError::entity_not_found("System variable", name))
    }

    /// Add one to `name` and return the new value.
    ///
    /// The increment happens in a single `UPDATE`, so concurrent callers
    /// always receive distinct values.
    pub async fn increment_value(&self, name: &str) -> AppResult<i64> {
        let statement = by_name(
            "UPDATE system_variables SET value = value + 1 WHERE name = @Name_1 RETURNING value",
            name,
        )?;
        let rows: Vec<VariableValue> = self
            .adapter
            .query(&statement)
            .await
            .map_err(|e| e.context(format!("system variable '{name}' increment")))?;

        let value = rows
            .first()
            .map(|row| row.value)
            .ok_or_else(|| AppError::entity_not_found("System variable", name))?;
        debug!(name, value, "System variable incremented");
        Ok(value)
    }
}

fn by_name(sql: &str, name: &str) -> AppResult<Statement> {
    let mut parameters = ParameterMap::new();
    parameters.insert("Name_1", SqlValue::Text(name.to_string()))?;
    Ok(Statement::new(sql, parameters))
}

#[cfg(test)]
mod tests {
    use comments_core::error::ErrorKind;

    use super::*;
    use crate::mock::MockAdapter;

    #[tokio::test]
    async fn test_increment_is_a_single_update() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_rows(vec![VariableValue { value: 8 }]);
        let variables = SystemVariableRepository::new(Arc::clone(&adapter));

        assert_eq!(variables.increment_value(LAST_COMMENT_NUMBER).await.unwrap(), 8);
        assert_eq!(adapter.calls(), 1);

        let statement = adapter.last_statement().unwrap();
        assert!(statement.sql.contains("value = value + 1"));
        assert_eq!(
            statement.parameters.get("Name_1"),
            Some(&SqlValue::Text(LAST_COMMENT_NUMBER.into()))
        );
    }

    #[tokio::test]
    async fn test_missing_variable_is_not_found() {
        let adapter = Arc::new(MockAdapter::new());
        let variables = SystemVariableRepository::new(adapter);

        let err = variables.get_value("Unknown").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

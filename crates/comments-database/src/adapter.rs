//! Execution adapters.
//!
//! The provider layer only builds [`Statement`]s; an adapter runs them.
//! [`PgAdapter`] runs them on a PostgreSQL pool.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::{Arguments, FromRow};
use tracing::debug;

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::types::{ColumnKind, SqlValue};

use crate::connection::DatabasePool;
use crate::statement::Statement;

/// Runs parameterized statements against the store.
#[async_trait]
pub trait DbAdapter: Send + Sync + 'static {
    /// Run a command and return the number of affected rows.
    async fn execute(&self, statement: &Statement) -> AppResult<u64>;

    /// Run a query and map every returned row to `T`.
    async fn query<T>(&self, statement: &Statement) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;
}

/// [`DbAdapter`] over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgAdapter {
    pool: PgPool,
}

impl PgAdapter {
    /// Create an adapter on `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<DatabasePool> for PgAdapter {
    fn from(pool: DatabasePool) -> Self {
        Self::new(pool.into_pool())
    }
}

#[async_trait]
impl DbAdapter for PgAdapter {
    async fn execute(&self, statement: &Statement) -> AppResult<u64> {
        let (sql, values) = statement.to_positional()?;
        debug!(sql = %sql, parameters = values.len(), "Executing command");

        let result = sqlx::query_with(&sql, arguments(&values)?)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn query<T>(&self, statement: &Statement) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let (sql, values) = statement.to_positional()?;
        debug!(sql = %sql, parameters = values.len(), "Executing query");

        let rows = sqlx::query_as_with::<_, T, _>(&sql, arguments(&values)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Encode values in position order.
fn arguments(values: &[&SqlValue]) -> AppResult<PgArguments> {
    let mut args = PgArguments::default();
    for (index, value) in values.iter().enumerate() {
        let added = match value {
            SqlValue::Boolean(v) => args.add(*v),
            SqlValue::Integer(v) => args.add(*v),
            SqlValue::Float(v) => args.add(*v),
            SqlValue::Uuid(v) => args.add(*v),
            SqlValue::Timestamp(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.clone()),
            SqlValue::Null(kind) => match kind {
                ColumnKind::Text => args.add(None::<String>),
                ColumnKind::Integer => args.add(None::<i64>),
                ColumnKind::Float => args.add(None::<f64>),
                ColumnKind::Boolean => args.add(None::<bool>),
                ColumnKind::Uuid => args.add(None::<uuid::Uuid>),
                ColumnKind::Timestamp => args.add(None::<chrono::DateTime<chrono::Utc>>),
            },
            SqlValue::List(_) => {
                return Err(AppError::internal(format!(
                    "parameter ${} is a list; lists must be expanded before binding",
                    index + 1
                )));
            }
        };
        added.map_err(|e| {
            AppError::internal(format!("Failed to encode parameter ${}: {e}", index + 1))
        })?;
    }
    Ok(args)
}

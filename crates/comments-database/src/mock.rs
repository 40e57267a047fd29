//! In-memory adapter for tests.
//!
//! Records every statement it receives instead of touching a database.
//! Queries return rows queued with [`MockAdapter::push_rows`]; commands
//! report the configured affected count.

use std::any::Any;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::postgres::PgRow;

use comments_core::error::AppError;
use comments_core::result::AppResult;

use crate::adapter::DbAdapter;
use crate::statement::Statement;

/// Adapter that records statements and replays canned results.
#[derive(Debug)]
pub struct MockAdapter {
    /// Statements received, in call order.
    statements: Mutex<Vec<Statement>>,
    /// Affected count returned by `execute`.
    affected: Mutex<u64>,
    /// Row sets returned by `query`, oldest first.
    rows: Mutex<VecDeque<Box<dyn Any + Send>>>,
    /// Error returned by the next call.
    failure: Mutex<Option<AppError>>,
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdapter {
    /// A mock reporting one affected row and no query rows.
    pub fn new() -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            affected: Mutex::new(1),
            rows: Mutex::new(VecDeque::new()),
            failure: Mutex::new(None),
        }
    }

    /// Set the affected count returned by `execute`.
    pub fn set_affected(&self, affected: u64) {
        *self.affected.lock().unwrap_or_else(|e| e.into_inner()) = affected;
    }

    /// Queue the rows returned by the next `query`.
    pub fn push_rows<T: Send + 'static>(&self, rows: Vec<T>) {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Box::new(rows));
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Every statement received so far.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent statement.
    pub fn last_statement(&self) -> Option<Statement> {
        self.statements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Number of calls received.
    pub fn calls(&self) -> usize {
        self.statements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn record(&self, statement: &Statement) -> AppResult<()> {
        // Placeholders must resolve just as they would on a real pool.
        statement.to_positional()?;
        self.statements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(statement.clone());

        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DbAdapter for MockAdapter {
    async fn execute(&self, statement: &Statement) -> AppResult<u64> {
        self.record(statement)?;
        Ok(*self.affected.lock().unwrap_or_else(|e| e.into_inner()))
    }

    async fn query<T>(&self, statement: &Statement) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        self.record(statement)?;
        let next = self
            .rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            None => Ok(Vec::new()),
            Some(rows) => rows.downcast::<Vec<T>>().map(|rows| *rows).map_err(|_| {
                AppError::internal(format!(
                    "queued rows are not of type {}",
                    std::any::type_name::<T>()
                ))
            }),
        }
    }
}

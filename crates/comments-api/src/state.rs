//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use comments_core::config::AppConfig;
use comments_database::{DatabasePool, PgAdapter};
use comments_service::{CommentService, StoryRecordService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: DatabasePool,
    /// Comment management
    pub comment_service: Arc<CommentService>,
    /// Story record reporting
    pub story_record_service: Arc<StoryRecordService>,
}

impl AppState {
    /// Wires services onto `db_pool`.
    pub fn new(config: AppConfig, db_pool: DatabasePool) -> Self {
        let adapter = Arc::new(PgAdapter::from(db_pool.clone()));
        let comment_service = Arc::new(CommentService::new(
            Arc::clone(&adapter),
            &config.comments,
        ));
        let story_record_service = Arc::new(StoryRecordService::new(adapter));

        Self {
            config: Arc::new(config),
            db_pool,
            comment_service,
            story_record_service,
        }
    }
}

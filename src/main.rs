//! GitLab Comments server.
//!
//! Main entry point that loads configuration, prepares the database and
//! starts the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use comments_core::config::{AppConfig, LogFormat};
use comments_core::error::AppError;
use comments_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `COMMENTS_ENV` overlay and env overrides.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("COMMENTS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("COMMENTS_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&dir, &env).map_err(|e| e.context(format!("loading '{dir}' ({env})")))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting GitLab Comments");

    // Fail at startup rather than on the first add.
    comments_service::format_number(&config.comments.number_template, 0)
        .map_err(|e| e.context("comments.number_template"))?;

    tracing::info!("Connecting to database...");
    let db_pool = DatabasePool::connect(&config.database).await?;

    if config.comments.read_only {
        tracing::info!("Read-only mode, skipping migrations");
    } else {
        tracing::info!("Running database migrations...");
        comments_database::migration::run_migrations(db_pool.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    comments_api::run_server(config, db_pool).await
}

//! # comments-api
//!
//! HTTP API for GitLab Comments built on Axum.
//!
//! Provides the comment and story record endpoints, the health check,
//! request logging and read-only middleware, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;

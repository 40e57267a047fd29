//! CORS layer configuration.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS layer for the browser front end.
///
/// The API carries no credentials, so any origin may call it.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}

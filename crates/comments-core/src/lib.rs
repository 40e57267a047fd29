//! # comments-core
//!
//! Core crate for GitLab Comments. Contains configuration schemas, the
//! filter model and operator table, scalar SQL values, entity metadata
//! contracts, the data provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

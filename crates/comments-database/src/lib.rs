//! # comments-database
//!
//! PostgreSQL data access for GitLab Comments: statements with named
//! parameters, the filter and complex column builders, the generic data
//! provider and the execution adapters it runs statements through.

pub mod adapter;
pub mod complex_columns;
pub mod connection;
pub mod filter_builder;
pub mod migration;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;
pub mod repositories;
pub mod statement;

pub use adapter::{DbAdapter, PgAdapter};
pub use complex_columns::{ComplexColumnBuilder, ComplexColumnData};
pub use connection::DatabasePool;
pub use filter_builder::{CompiledFilter, FilterBuilder};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockAdapter;
pub use provider::SqlDataProvider;
pub use statement::{ParameterMap, Statement};

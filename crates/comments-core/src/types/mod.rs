//! Core type definitions used across the workspace.

pub mod filter;
pub mod operator;
pub mod value;

pub use filter::{FilterGroup, FilterItem, FilterNode, LogicalJoin, SelectConfiguration};
pub use operator::{ComparisonOperator, OPERATOR_TABLE};
pub use value::{ColumnKind, SqlValue};

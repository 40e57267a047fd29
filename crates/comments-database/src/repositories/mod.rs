//! Repositories for tables outside the generic provider.

pub mod system_variable;

pub use system_variable::{LAST_COMMENT_NUMBER, SystemVariableRepository, VariableValue};

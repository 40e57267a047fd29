//! Core traits defined in `comments-core` and implemented by other crates.

pub mod entity;
pub mod repository;

pub use entity::{
    Changeset, ColumnDef, DerivedColumn, DerivedExpression, Entity, FieldChange, Projection,
    StaticValue,
};
pub use repository::DataProvider;

//! Entity and projection metadata.
//!
//! Tables, columns and derived expressions are declared as constants on
//! each type, so statement builders never inspect types at runtime.

use sqlx::FromRow;
use sqlx::postgres::PgRow;

use crate::types::value::{ColumnKind, SqlValue};

/// Mapping of one entity field to its table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Logical field name, as used by filters (`CreatedOn`).
    pub field: &'static str,
    /// Column name in the table (`created_on`).
    pub column: &'static str,
    /// Declared column type.
    pub kind: ColumnKind,
    /// Primary key column.
    pub is_identity: bool,
    /// Value assigned by the store (defaults, sequences).
    pub is_generated: bool,
}

impl ColumnDef {
    /// A regular, caller-written column.
    pub const fn new(field: &'static str, column: &'static str, kind: ColumnKind) -> Self {
        Self {
            field,
            column,
            kind,
            is_identity: false,
            is_generated: false,
        }
    }

    /// The primary key; always generated by the store.
    pub const fn identity(field: &'static str, column: &'static str, kind: ColumnKind) -> Self {
        Self {
            field,
            column,
            kind,
            is_identity: true,
            is_generated: true,
        }
    }

    /// A column filled by a store default.
    pub const fn generated(field: &'static str, column: &'static str, kind: ColumnKind) -> Self {
        Self {
            field,
            column,
            kind,
            is_identity: false,
            is_generated: true,
        }
    }

    /// Whether `name` refers to this column by field or column name.
    pub fn matches(&self, name: &str) -> bool {
        self.field == name || self.column == name
    }

    /// Whether `INSERT` writes this column.
    pub fn is_insertable(&self) -> bool {
        !self.is_identity && !self.is_generated
    }
}

/// Find a column by field or column name.
pub fn find_column<'a>(columns: &'a [ColumnDef], name: &str) -> Option<&'a ColumnDef> {
    columns.iter().find(|column| column.matches(name))
}

/// A constant usable inside derived expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticValue {
    /// A boolean constant.
    Boolean(bool),
    /// An integer constant.
    Integer(i64),
    /// A string constant.
    Text(&'static str),
}

impl From<StaticValue> for SqlValue {
    fn from(value: StaticValue) -> Self {
        match value {
            StaticValue::Boolean(v) => SqlValue::Boolean(v),
            StaticValue::Integer(v) => SqlValue::Integer(v),
            StaticValue::Text(v) => SqlValue::Text(v.to_string()),
        }
    }
}

/// SQL expression behind a derived projection column.
///
/// Table and column names are trusted constants; only condition values are
/// bound as parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedExpression {
    /// A column of a related row found through a foreign key of the base
    /// table: `base.foreign_key = table.key`.
    Lookup {
        /// Column of the base table holding the reference.
        foreign_key: &'static str,
        /// Related table.
        table: &'static str,
        /// Referenced column of the related table.
        key: &'static str,
        /// Column read from the related row.
        column: &'static str,
    },
    /// Number of related rows pointing at the base row:
    /// `table.foreign_key = base.key`, optionally narrowed by
    /// `table.column = value`.
    Count {
        /// Related table.
        table: &'static str,
        /// Column of the related table holding the reference.
        foreign_key: &'static str,
        /// Referenced column of the base table.
        key: &'static str,
        /// Optional equality condition on the related rows.
        condition: Option<(&'static str, StaticValue)>,
    },
}

/// A projection column computed by a correlated subquery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedColumn {
    /// Output column name, read back by `FromRow`.
    pub alias: &'static str,
    /// Expression producing the value.
    pub expression: DerivedExpression,
}

/// A row shape that can be selected from an entity table.
pub trait Projection: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Plain table columns read into this type, in declaration order.
    const COLUMNS: &'static [&'static str];

    /// Derived columns appended after the plain ones, in declaration order.
    const DERIVED: &'static [DerivedColumn] = &[];
}

/// A type persisted as one row of [`Entity::TABLE`].
pub trait Entity: Projection {
    /// Table name.
    const TABLE: &'static str;

    /// All mapped columns in declaration order.
    const FIELDS: &'static [ColumnDef];

    /// Value of a field for `INSERT`, by field name.
    fn value(&self, field: &str) -> Option<SqlValue>;

    /// The primary key column.
    fn identity() -> Option<&'static ColumnDef> {
        Self::FIELDS.iter().find(|column| column.is_identity)
    }
}

/// New value of one field in a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// `column = value`
    Assign(SqlValue),
    /// `column = column + delta`, applied atomically by the store.
    Increment(i64),
}

/// A typed set of optional field changes for entity `E`.
///
/// Only fields returned by [`Changeset::changes`] are written; every other
/// column keeps its stored value.
pub trait Changeset<E: Entity>: Send + Sync {
    /// Supplied changes as `(field name, change)` pairs.
    fn changes(&self) -> Vec<(&'static str, FieldChange)>;
}

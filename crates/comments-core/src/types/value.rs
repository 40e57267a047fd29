//! Scalar SQL values carried by filters, changesets and parameter maps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// `TEXT` / `VARCHAR`.
    Text,
    /// `BIGINT`.
    Integer,
    /// `DOUBLE PRECISION`.
    Float,
    /// `BOOLEAN`.
    Boolean,
    /// `UUID`.
    Uuid,
    /// `TIMESTAMPTZ`.
    Timestamp,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Uuid => "uuid",
            Self::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A dynamic value bound to a statement parameter.
///
/// Deserializes untagged, so JSON filter payloads map naturally: strings
/// that parse as UUIDs or RFC 3339 timestamps become [`SqlValue::Uuid`] and
/// [`SqlValue::Timestamp`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A UUID value.
    Uuid(Uuid),
    /// A UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// A string value.
    Text(String),
    /// A list of values, only valid for `IN` / `NOT IN`.
    List(Vec<SqlValue>),
    /// A typed `NULL`; PostgreSQL needs the type to plan the parameter.
    Null(ColumnKind),
}

impl SqlValue {
    /// Kind of this value, `None` for lists.
    pub fn kind(&self) -> Option<ColumnKind> {
        match self {
            Self::Boolean(_) => Some(ColumnKind::Boolean),
            Self::Integer(_) => Some(ColumnKind::Integer),
            Self::Float(_) => Some(ColumnKind::Float),
            Self::Uuid(_) => Some(ColumnKind::Uuid),
            Self::Timestamp(_) => Some(ColumnKind::Timestamp),
            Self::Text(_) => Some(ColumnKind::Text),
            Self::Null(kind) => Some(*kind),
            Self::List(_) => None,
        }
    }

    /// Whether this scalar can be bound against a column of `kind`.
    ///
    /// Integers are accepted for float columns; nothing else is coerced.
    pub fn is_compatible_with(&self, kind: ColumnKind) -> bool {
        match (self.kind(), kind) {
            (Some(ColumnKind::Integer), ColumnKind::Float) => true,
            (Some(own), expected) => own == expected,
            (None, _) => false,
        }
    }

    /// Convert an optional value into a scalar or a typed `NULL`.
    pub fn nullable<T: Into<SqlValue>>(value: Option<T>, kind: ColumnKind) -> Self {
        value.map_or(Self::Null(kind), Into::into)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

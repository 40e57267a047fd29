//! Filter types for dynamic query building.

use serde::{Deserialize, Serialize};

use super::operator::ComparisonOperator;
use super::value::SqlValue;

/// How the children of a [`FilterGroup`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicalJoin {
    /// All children must hold.
    #[default]
    And,
    /// At least one child must hold.
    Or,
}

impl LogicalJoin {
    /// Return the SQL keyword for this join.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A single comparison on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterItem {
    /// Item name, used as the seed of its parameter key.
    pub name: String,
    /// The field or column name to filter on.
    pub field_name: String,
    /// The comparison operator.
    pub operator: ComparisonOperator,
    /// The value to compare against.
    pub value: SqlValue,
}

impl FilterItem {
    /// Create a new filter item.
    pub fn new(
        name: impl Into<String>,
        field_name: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        Self {
            name: name.into(),
            field_name: field_name.into(),
            operator,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter named after its field.
    pub fn eq(field_name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let field_name = field_name.into();
        Self::new(field_name.clone(), field_name, ComparisonOperator::Equal, value)
    }
}

/// Either a comparison or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    /// A nested group.
    Group(FilterGroup),
    /// A single comparison.
    Item(FilterItem),
}

impl From<FilterItem> for FilterNode {
    fn from(item: FilterItem) -> Self {
        Self::Item(item)
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(group: FilterGroup) -> Self {
        Self::Group(group)
    }
}

/// A named, logically joined collection of comparisons and groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterGroup {
    /// Group name, for diagnostics.
    pub name: String,
    /// Join applied between children.
    #[serde(default)]
    pub join: LogicalJoin,
    /// Children in compile order.
    #[serde(default)]
    pub items: Vec<FilterNode>,
}

impl FilterGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>, join: LogicalJoin) -> Self {
        Self {
            name: name.into(),
            join,
            items: Vec::new(),
        }
    }

    /// Create an empty `AND` group.
    pub fn and(name: impl Into<String>) -> Self {
        Self::new(name, LogicalJoin::And)
    }

    /// Create an empty `OR` group.
    pub fn or(name: impl Into<String>) -> Self {
        Self::new(name, LogicalJoin::Or)
    }

    /// Append a child, builder style.
    pub fn with(mut self, node: impl Into<FilterNode>) -> Self {
        self.items.push(node.into());
        self
    }

    /// Append a child.
    pub fn push(&mut self, node: impl Into<FilterNode>) {
        self.items.push(node.into());
    }

    /// Whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Options of a provider `select`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectConfiguration {
    /// Optional `WHERE` filter; absent means no `WHERE` clause at all.
    #[serde(default)]
    pub filter: Option<FilterGroup>,
}

impl SelectConfiguration {
    /// Configuration with a filter.
    pub fn filtered(filter: FilterGroup) -> Self {
        Self {
            filter: Some(filter),
        }
    }
}

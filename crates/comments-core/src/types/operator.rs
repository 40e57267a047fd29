//! Comparison operators and their SQL tokens.

use serde::{Deserialize, Serialize};

/// Comparison applied by a single filter item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqual,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IN (...)`, the value must be a list.
    In,
    /// `NOT IN (...)`, the value must be a list.
    NotIn,
    /// Accepted on input but never compiled: a range is two items, one
    /// `GreaterOrEqual` and one `LessOrEqual`.
    Between,
}

/// SQL token of every operator that can be compiled.
///
/// Variants absent from this table resolve to an empty token.
pub static OPERATOR_TABLE: &[(ComparisonOperator, &str)] = &[
    (ComparisonOperator::Equal, "="),
    (ComparisonOperator::NotEqual, "<>"),
    (ComparisonOperator::GreaterThan, ">"),
    (ComparisonOperator::GreaterOrEqual, ">="),
    (ComparisonOperator::LessThan, "<"),
    (ComparisonOperator::LessOrEqual, "<="),
    (ComparisonOperator::Like, "LIKE"),
    (ComparisonOperator::NotLike, "NOT LIKE"),
    (ComparisonOperator::In, "IN"),
    (ComparisonOperator::NotIn, "NOT IN"),
];

impl ComparisonOperator {
    /// SQL token of this operator, or `""` when it has no mapping.
    pub fn sql_operator(self) -> &'static str {
        resolve(self)
    }

    /// Whether the operator compares against a list of values.
    pub fn expects_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// Look up the SQL token of `operator` in [`OPERATOR_TABLE`].
pub fn resolve(operator: ComparisonOperator) -> &'static str {
    OPERATOR_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == operator)
        .map_or("", |(_, token)| token)
}

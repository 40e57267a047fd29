//! Compiles filter trees into SQL predicates.
//!
//! A [`FilterGroup`] becomes a predicate string with `@key` placeholders
//! plus a [`ParameterMap`] holding the compared values. Every Filter Item
//! is validated against the entity columns before anything is emitted.

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::traits::ColumnDef;
use comments_core::traits::entity::find_column;
use comments_core::types::{
    ComparisonOperator, FilterGroup, FilterItem, FilterNode, LogicalJoin, SqlValue,
};

use crate::statement::{ParameterMap, ParameterNamer};

/// Output of [`FilterBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    /// Predicate without the `WHERE` keyword; empty for an empty tree.
    pub predicate: String,
    /// Values referenced by the predicate.
    pub parameters: ParameterMap,
}

impl CompiledFilter {
    /// Whether the tree contributed no condition.
    pub fn is_empty(&self) -> bool {
        self.predicate.is_empty()
    }
}

/// Builds predicates over one entity's columns.
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder<'a> {
    columns: &'a [ColumnDef],
}

struct BuildState {
    namer: ParameterNamer,
    parameters: ParameterMap,
}

impl<'a> FilterBuilder<'a> {
    /// A builder validating field names against `columns`.
    pub fn new(columns: &'a [ColumnDef]) -> Self {
        Self { columns }
    }

    /// Compile `group`.
    ///
    /// Parameter keys are numbered per call, so building the same tree
    /// twice yields the same SQL.
    pub fn build(&self, group: &FilterGroup) -> AppResult<CompiledFilter> {
        let mut state = BuildState {
            namer: ParameterNamer::new(),
            parameters: ParameterMap::new(),
        };
        let predicate = self.compile_group(group, None, &mut state)?;
        Ok(CompiledFilter {
            predicate,
            parameters: state.parameters,
        })
    }

    fn compile_group(
        &self,
        group: &FilterGroup,
        parent: Option<LogicalJoin>,
        state: &mut BuildState,
    ) -> AppResult<String> {
        let mut parts = Vec::with_capacity(group.items.len());
        for node in &group.items {
            let part = match node {
                FilterNode::Item(item) => self.compile_item(item, state)?,
                FilterNode::Group(child) => self.compile_group(child, Some(group.join), state)?,
            };
            if !part.is_empty() {
                parts.push(part);
            }
        }

        if parts.is_empty() {
            return Ok(String::new());
        }

        let separator = format!(" {} ", group.join.as_sql());
        let joined = parts.join(&separator);
        let mixed_join = parent.is_some_and(|join| join != group.join);
        if parts.len() > 1 || mixed_join {
            Ok(format!("({joined})"))
        } else {
            Ok(joined)
        }
    }

    fn compile_item(&self, item: &FilterItem, state: &mut BuildState) -> AppResult<String> {
        let label = if item.name.is_empty() {
            item.field_name.as_str()
        } else {
            item.name.as_str()
        };

        let operator = item.operator.sql_operator();
        if operator.is_empty() {
            return Err(AppError::invalid_filter(
                label,
                format!("operator {:?} has no SQL mapping", item.operator),
            ));
        }

        let column = find_column(self.columns, &item.field_name).ok_or_else(|| {
            AppError::invalid_filter(label, format!("unknown field '{}'", item.field_name))
        })?;

        if item.operator.expects_list() {
            let SqlValue::List(values) = &item.value else {
                return Err(AppError::invalid_filter(
                    label,
                    format!("{operator} expects a list of values"),
                ));
            };
            if values.is_empty() {
                return Err(AppError::invalid_filter(
                    label,
                    format!("{operator} needs at least one value"),
                ));
            }

            let mut placeholders = Vec::with_capacity(values.len());
            for value in values {
                check_kind(label, value, column)?;
                let element_key = state.namer.next_key(label);
                placeholders.push(format!("@{element_key}"));
                state.parameters.insert(element_key, value.clone())?;
            }
            return Ok(format!(
                "{} {operator} ({})",
                column.column,
                placeholders.join(", ")
            ));
        }

        check_kind(label, &item.value, column)?;

        if let SqlValue::Null(_) = item.value {
            return match item.operator {
                ComparisonOperator::Equal => Ok(format!("{} IS NULL", column.column)),
                ComparisonOperator::NotEqual => Ok(format!("{} IS NOT NULL", column.column)),
                _ => Err(AppError::invalid_filter(
                    label,
                    format!("NULL cannot be compared with {operator}"),
                )),
            };
        }

        let key = state.namer.next_key(label);
        state.parameters.insert(key.clone(), item.value.clone())?;
        Ok(format!("{} {operator} @{key}", column.column))
    }
}

fn check_kind(label: &str, value: &SqlValue, column: &ColumnDef) -> AppResult<()> {
    if value.is_compatible_with(column.kind) {
        return Ok(());
    }
    let found = value
        .kind()
        .map_or_else(|| "list".to_string(), |kind| kind.to_string());
    Err(AppError::invalid_filter(
        label,
        format!(
            "{found} value does not match {} column '{}'",
            column.kind, column.column
        ),
    ))
}

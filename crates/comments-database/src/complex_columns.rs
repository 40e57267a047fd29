//! Derived projection columns.
//!
//! Turns the [`DerivedColumn`]s of a projection into correlated subqueries
//! appended to the select list of its base table.

use std::collections::HashSet;

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::traits::{DerivedColumn, DerivedExpression, Projection};

use crate::statement::{ParameterMap, sanitize};

/// Select-list fragments for the derived columns of one projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexColumnData {
    /// `(sql_expression, alias)` pairs in declaration order.
    pub fragments: Vec<(String, String)>,
    /// Values referenced by the fragments.
    pub parameters: ParameterMap,
}

impl ComplexColumnData {
    /// Whether the projection has no derived columns.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments rendered as `expression AS alias`.
    pub fn select_list(&self) -> impl Iterator<Item = String> + '_ {
        self.fragments
            .iter()
            .map(|(expression, alias)| format!("{expression} AS {alias}"))
    }
}

/// Builds [`ComplexColumnData`] for projections.
pub struct ComplexColumnBuilder;

impl ComplexColumnBuilder {
    /// Build the derived columns of `P` selected from `base_table`.
    ///
    /// Subqueries alias their table `cc_<n>`, numbered in declaration
    /// order, so the output is the same on every call. Aliases must be
    /// unique and must not shadow a plain column of `P`.
    pub fn build<P: Projection>(base_table: &str) -> AppResult<ComplexColumnData> {
        Self::build_columns(std::any::type_name::<P>(), P::COLUMNS, P::DERIVED, base_table)
    }

    fn build_columns(
        target: &str,
        plain: &[&str],
        derived: &[DerivedColumn],
        base_table: &str,
    ) -> AppResult<ComplexColumnData> {
        let mut data = ComplexColumnData::default();
        let mut aliases = HashSet::new();

        for (index, column) in derived.iter().enumerate() {
            if plain.contains(&column.alias) {
                return Err(AppError::invalid_mapping(
                    target,
                    format!("derived column '{}' shadows a plain column", column.alias),
                ));
            }
            if !aliases.insert(column.alias) {
                return Err(AppError::invalid_mapping(
                    target,
                    format!("derived column '{}' is declared twice", column.alias),
                ));
            }

            let inner = format!("cc_{}", index + 1);
            let expression = match column.expression {
                DerivedExpression::Lookup {
                    foreign_key,
                    table,
                    key,
                    column: source,
                } => format!(
                    "(SELECT {inner}.{source} FROM {table} {inner} \
                     WHERE {inner}.{key} = {base_table}.{foreign_key})"
                ),
                DerivedExpression::Count {
                    table,
                    foreign_key,
                    key,
                    condition,
                } => {
                    let mut sql = format!(
                        "(SELECT COUNT(*) FROM {table} {inner} \
                         WHERE {inner}.{foreign_key} = {base_table}.{key}"
                    );
                    if let Some((condition_column, value)) = condition {
                        let parameter = format!("{}_filter", sanitize(column.alias));
                        sql.push_str(&format!(" AND {inner}.{condition_column} = @{parameter}"));
                        data.parameters.insert(parameter, value.into())?;
                    }
                    sql.push(')');
                    sql
                }
            };
            data.fragments.push((expression, column.alias.to_string()));
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use comments_core::error::ErrorKind;
    use comments_core::traits::StaticValue;
    use comments_core::types::SqlValue;
    use comments_entity::StoryRecordReadModel;

    use super::*;

    const USAGE: DerivedColumn = DerivedColumn {
        alias: "increments",
        expression: DerivedExpression::Count {
            table: "story_records",
            foreign_key: "comment_id",
            key: "id",
            condition: Some(("is_increment_action", StaticValue::Boolean(true))),
        },
    };

    #[test]
    fn test_lookup_fragment() {
        let data = ComplexColumnBuilder::build::<StoryRecordReadModel>("story_records").unwrap();
        assert_eq!(
            data.fragments,
            vec![(
                "(SELECT cc_1.message FROM comments cc_1 WHERE cc_1.id = story_records.comment_id)"
                    .to_string(),
                "comment_text".to_string()
            )]
        );
        assert!(data.parameters.is_empty());
    }

    #[test]
    fn test_count_fragment_binds_condition() {
        let data =
            ComplexColumnBuilder::build_columns("CommentUsage", &["id"], &[USAGE], "comments")
                .unwrap();

        assert_eq!(
            data.select_list().collect::<Vec<_>>(),
            vec![
                "(SELECT COUNT(*) FROM story_records cc_1 WHERE cc_1.comment_id = comments.id \
                 AND cc_1.is_increment_action = @increments_filter) AS increments"
            ]
        );
        assert_eq!(
            data.parameters.get("increments_filter"),
            Some(&SqlValue::Boolean(true))
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let derived = [
            USAGE,
            DerivedColumn {
                alias: "text",
                expression: DerivedExpression::Lookup {
                    foreign_key: "comment_id",
                    table: "comments",
                    key: "id",
                    column: "message",
                },
            },
        ];
        let first = ComplexColumnBuilder::build_columns("T", &[], &derived, "story_records");
        let second = ComplexColumnBuilder::build_columns("T", &[], &derived, "story_records");
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_alias_collisions_are_rejected() {
        let err = ComplexColumnBuilder::build_columns("T", &[], &[USAGE, USAGE], "comments")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidMapping);

        let err = ComplexColumnBuilder::build_columns("T", &["increments"], &[USAGE], "comments")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidMapping);
    }

    #[test]
    fn test_plain_projection_has_no_fragments() {
        let data = ComplexColumnBuilder::build::<comments_entity::CommentModel>("comments").unwrap();
        assert!(data.is_empty());
    }
}

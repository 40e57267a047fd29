//! Generic CRUD provider.
//!
//! [`SqlDataProvider`] assembles complete statements from entity metadata,
//! the filter builder and the complex column builder, then hands each one
//! to its [`DbAdapter`]. Every operation makes at most one adapter call.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

use comments_core::error::AppError;
use comments_core::result::AppResult;
use comments_core::traits::entity::find_column;
use comments_core::traits::{
    Changeset, ColumnDef, DataProvider, Entity, FieldChange, Projection,
};
use comments_core::types::{
    ColumnKind, ComparisonOperator, FilterGroup, FilterItem, SelectConfiguration, SqlValue,
};

use crate::adapter::{DbAdapter, PgAdapter};
use crate::complex_columns::ComplexColumnBuilder;
use crate::filter_builder::FilterBuilder;
use crate::statement::{ParameterMap, ParameterNamer, Statement};

/// Row returned by `INSERT … RETURNING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InsertedId {
    /// Identifier assigned by the store.
    pub id: Uuid,
}

/// [`DataProvider`] for entity `E`, running statements through `A`.
pub struct SqlDataProvider<E, A = PgAdapter> {
    adapter: Arc<A>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, A> Clone for SqlDataProvider<E, A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            _entity: PhantomData,
        }
    }
}

impl<E, A> std::fmt::Debug for SqlDataProvider<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlDataProvider")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: Entity, A: DbAdapter> SqlDataProvider<E, A> {
    /// A provider sharing `adapter`.
    pub fn new(adapter: Arc<A>) -> Self {
        Self {
            adapter,
            _entity: PhantomData,
        }
    }

    /// The adapter statements are sent to.
    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// Build `INSERT INTO t (…) VALUES (…) RETURNING id`.
    pub fn insert_statement(entity: &E) -> AppResult<Statement> {
        let identity = identity::<E>()?;
        let mut namer = ParameterNamer::new();
        let mut parameters = ParameterMap::new();
        let mut columns = Vec::new();
        let mut placeholders = Vec::new();

        for column in E::FIELDS.iter().filter(|c| c.is_insertable()) {
            let value = entity.value(column.field).ok_or_else(|| {
                AppError::invalid_mapping(
                    E::TABLE,
                    format!("no value for field '{}'", column.field),
                )
            })?;
            check_value::<E>(column, &value)?;

            let key = namer.next_key(column.field);
            placeholders.push(format!("@{key}"));
            columns.push(column.column);
            parameters.insert(key, value)?;
        }

        let sql = if columns.is_empty() {
            format!(
                "INSERT INTO {} DEFAULT VALUES RETURNING {} AS id",
                E::TABLE,
                identity.column
            )
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {} AS id",
                E::TABLE,
                columns.join(", "),
                placeholders.join(", "),
                identity.column
            )
        };
        Ok(Statement::new(sql, parameters))
    }

    /// Build `SELECT <P columns>[, <derived>] FROM t[ WHERE …]`.
    pub fn select_statement<P: Projection>(config: &SelectConfiguration) -> AppResult<Statement> {
        let target = std::any::type_name::<P>();
        if P::COLUMNS.is_empty() && P::DERIVED.is_empty() {
            return Err(AppError::invalid_mapping(target, "projection selects no columns"));
        }

        let mut select_list = Vec::with_capacity(P::COLUMNS.len() + P::DERIVED.len());
        for name in P::COLUMNS {
            let column = find_column(E::FIELDS, name).ok_or_else(|| {
                AppError::invalid_mapping(
                    target,
                    format!("column '{name}' does not exist in '{}'", E::TABLE),
                )
            })?;
            select_list.push(column.column.to_string());
        }

        let complex = ComplexColumnBuilder::build::<P>(E::TABLE)?;
        for (_, alias) in &complex.fragments {
            if find_column(E::FIELDS, alias).is_some() {
                return Err(AppError::invalid_mapping(
                    target,
                    format!("derived column '{alias}' collides with a column of '{}'", E::TABLE),
                ));
            }
        }
        select_list.extend(complex.select_list());

        let mut parameters = complex.parameters;
        let mut sql = format!("SELECT {} FROM {}", select_list.join(", "), E::TABLE);

        if let Some(group) = &config.filter {
            let filter = FilterBuilder::new(E::FIELDS).build(group)?;
            if !filter.is_empty() {
                parameters.merge(filter.parameters)?;
                sql.push_str(" WHERE ");
                sql.push_str(&filter.predicate);
            }
        }

        Ok(Statement::new(sql, parameters))
    }

    /// Build `UPDATE t SET … WHERE id = @Id_n`, or `None` when nothing changes.
    pub fn update_statement<C: Changeset<E>>(id: Uuid, changes: &C) -> AppResult<Option<Statement>> {
        let changes = changes.changes();
        if changes.is_empty() {
            return Ok(None);
        }

        let identity = identity::<E>()?;
        let mut namer = ParameterNamer::new();
        let mut parameters = ParameterMap::new();
        let mut assignments = Vec::with_capacity(changes.len());
        let mut written: Vec<&str> = Vec::with_capacity(changes.len());

        for (field, change) in changes {
            let column = find_column(E::FIELDS, field).ok_or_else(|| {
                AppError::invalid_mapping(E::TABLE, format!("unknown field '{field}'"))
            })?;
            if column.is_identity || column.is_generated {
                return Err(AppError::invalid_mapping(
                    E::TABLE,
                    format!("field '{}' is managed by the store", column.field),
                ));
            }
            if written.contains(&column.column) {
                return Err(AppError::invalid_mapping(
                    E::TABLE,
                    format!("field '{}' is changed twice", column.field),
                ));
            }
            written.push(column.column);

            let key = namer.next_key(column.field);
            match change {
                FieldChange::Assign(value) => {
                    check_value::<E>(column, &value)?;
                    assignments.push(format!("{} = @{key}", column.column));
                    parameters.insert(key, value)?;
                }
                FieldChange::Increment(delta) => {
                    if !matches!(column.kind, ColumnKind::Integer | ColumnKind::Float) {
                        return Err(AppError::invalid_mapping(
                            E::TABLE,
                            format!("field '{}' is not numeric", column.field),
                        ));
                    }
                    assignments.push(format!("{0} = {0} + @{key}", column.column));
                    parameters.insert(key, SqlValue::Integer(delta))?;
                }
            }
        }

        let id_key = namer.next_key(identity.field);
        parameters.insert(id_key.clone(), SqlValue::Uuid(id))?;
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = @{id_key}",
            E::TABLE,
            assignments.join(", "),
            identity.column
        );
        Ok(Some(Statement::new(sql, parameters)))
    }

    /// Build `DELETE FROM t WHERE id IN (…)`, or `None` for no ids.
    pub fn delete_statement(ids: &[Uuid]) -> AppResult<Option<Statement>> {
        if ids.is_empty() {
            return Ok(None);
        }

        let identity = identity::<E>()?;
        let mut namer = ParameterNamer::new();
        let mut parameters = ParameterMap::new();
        let mut placeholders = Vec::with_capacity(ids.len());
        for id in ids {
            let key = namer.next_key(identity.field);
            placeholders.push(format!("@{key}"));
            parameters.insert(key, SqlValue::Uuid(*id))?;
        }

        let sql = format!(
            "DELETE FROM {} WHERE {} IN ({})",
            E::TABLE,
            identity.column,
            placeholders.join(", ")
        );
        Ok(Some(Statement::new(sql, parameters)))
    }

    fn context(operation: &str) -> String {
        format!("{} {operation}", E::TABLE)
    }
}

#[async_trait]
impl<E, A> DataProvider<E> for SqlDataProvider<E, A>
where
    E: Entity,
    A: DbAdapter,
{
    async fn add(&self, entity: &E) -> AppResult<Uuid> {
        let statement = Self::insert_statement(entity)?;
        debug!(table = E::TABLE, "Adding entity");

        let rows: Vec<InsertedId> = self
            .adapter
            .query(&statement)
            .await
            .map_err(|e| e.context(Self::context("add")))?;

        rows.first().map(|row| row.id).ok_or_else(|| {
            AppError::database(format!("{}: insert returned no identifier", Self::context("add")))
        })
    }

    async fn select<P: Projection>(&self, config: &SelectConfiguration) -> AppResult<Vec<P>> {
        let statement = Self::select_statement::<P>(config)?;
        debug!(table = E::TABLE, projection = std::any::type_name::<P>(), "Selecting rows");

        self.adapter
            .query(&statement)
            .await
            .map_err(|e| e.context(Self::context("select")))
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<E>> {
        let identity = identity::<E>()?;
        let filter = FilterGroup::and("ById").with(FilterItem::new(
            identity.field,
            identity.field,
            ComparisonOperator::Equal,
            id,
        ));
        let statement = Self::select_statement::<E>(&SelectConfiguration::filtered(filter))?;

        let rows: Vec<E> = self
            .adapter
            .query(&statement)
            .await
            .map_err(|e| e.context(Self::context("get")))?;
        Ok(rows.into_iter().next())
    }

    async fn update<C: Changeset<E>>(&self, id: Uuid, changes: &C) -> AppResult<u64> {
        let Some(statement) = Self::update_statement(id, changes)? else {
            debug!(table = E::TABLE, %id, "Nothing to update");
            return Ok(0);
        };

        self.adapter
            .execute(&statement)
            .await
            .map_err(|e| e.context(Self::context("update")))
    }

    async fn delete(&self, ids: &[Uuid]) -> AppResult<u64> {
        let Some(statement) = Self::delete_statement(ids)? else {
            return Ok(0);
        };

        self.adapter
            .execute(&statement)
            .await
            .map_err(|e| e.context(Self::context("delete")))
    }
}

fn identity<E: Entity>() -> AppResult<&'static ColumnDef> {
    E::identity()
        .ok_or_else(|| AppError::invalid_mapping(E::TABLE, "entity has no identity column"))
}

fn check_value<E: Entity>(column: &ColumnDef, value: &SqlValue) -> AppResult<()> {
    if value.is_compatible_with(column.kind) {
        Ok(())
    } else {
        Err(AppError::invalid_mapping(
            E::TABLE,
            format!("value for field '{}' is not {}", column.field, column.kind),
        ))
    }
}

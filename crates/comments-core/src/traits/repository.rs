//! Generic data provider trait for database access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::traits::entity::{Changeset, Entity, Projection};
use crate::types::filter::SelectConfiguration;

/// Generic CRUD access to the table of entity `E`.
///
/// Every method issues at most one statement. Missing rows are reported as
/// `None` or a zero count; turning them into errors is up to the caller.
#[async_trait]
pub trait DataProvider<E>: Send + Sync + 'static
where
    E: Entity,
{
    /// Insert every non-generated column and return the new identifier.
    async fn add(&self, entity: &E) -> AppResult<Uuid>;

    /// Select rows shaped as `P`, filtered by `config.filter` if present.
    async fn select<P: Projection>(&self, config: &SelectConfiguration) -> AppResult<Vec<P>>;

    /// Find an entity by its primary key.
    async fn get(&self, id: Uuid) -> AppResult<Option<E>>;

    /// Write exactly the supplied fields of one row. Returns affected rows.
    async fn update<C: Changeset<E>>(&self, id: Uuid, changes: &C) -> AppResult<u64>;

    /// Delete rows by primary key. Returns affected rows.
    async fn delete(&self, ids: &[Uuid]) -> AppResult<u64>;
}

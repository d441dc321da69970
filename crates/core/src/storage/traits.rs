use async_trait::async_trait;

use super::Result;

/// Persistence contract for one catalog entity type.
///
/// Implementations persist an aggregate root together with every child it
/// owns: `save` assigns ids to the root and to any child without one, and
/// `delete` removes the root along with all of its children.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Loads every stored entity, ordered by position.
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Loads a single entity by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>>;

    /// Inserts or updates an entity and returns it with its ids assigned.
    async fn save(&self, entity: &T) -> Result<T>;

    /// Saves a batch of entities in one operation.
    async fn save_all(&self, entities: &[T]) -> Result<Vec<T>>;

    /// Deletes an entity and everything it owns.
    async fn delete(&self, entity: &T) -> Result<()>;

    /// Deletes every entity of this type.
    async fn delete_all(&self) -> Result<()>;
}

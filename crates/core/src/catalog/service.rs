//! Ordered catalog service.
//!
//! Wraps a [`Repository`] and a [`Cache`] into a collection that keeps an
//! insertion order in each entity's `position`. The whole list of a type is
//! cached under one key:
//!
//! - **Reads**: served from the cached list; on miss the list is loaded from
//!   the repository and written to the cache
//! - **Writes**: persisted to the repository, then the updated list replaces
//!   the cached one
//!
//! Every operation holds the catalog's lock for its whole read-modify-write
//! sequence, so concurrent calls on one catalog never see or produce a
//! half-updated list. Repository and cache writes are not transactional: if
//! the repository write succeeds and the cache write fails, the error is
//! returned and the two disagree until the next `new_data` or cache expiry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{deserialize_list, serialize_list, Cache};
use crate::storage::Repository;

use super::{CatalogError, CopyStrategy, Entity, Result};

/// Generic ordered catalog over one entity type.
///
/// # Type Parameters
///
/// * `T` - The catalog entity
/// * `R` - The repository persisting `T`
/// * `C` - The cache holding the materialized list
pub struct OrderedCatalog<T, R, C>
where
    T: Entity,
    R: Repository<T>,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    key: String,
    ttl: Option<Duration>,
    copier: CopyStrategy<T>,
    lock: Mutex<()>,
}

impl<T, R, C> OrderedCatalog<T, R, C>
where
    T: Entity,
    R: Repository<T>,
    C: Cache,
{
    /// Creates a new catalog.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository persisting the entities
    /// * `cache` - The cache holding the materialized list
    /// * `key` - The cache key for this entity type
    /// * `copier` - The aggregate copy strategy used by [`duplicate`](Self::duplicate)
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if `key` is empty.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<C>,
        key: impl Into<String>,
        copier: impl Fn(&T) -> T + Send + Sync + 'static,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "cache key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            repository,
            cache,
            key,
            ttl: None,
            copier: Arc::new(copier),
            lock: Mutex::new(()),
        })
    }

    /// Sets the time-to-live used for every cache write.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Returns the cache key of this catalog.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Deletes every entity and clears the cache.
    pub async fn new_data(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        self.repository.delete_all().await?;
        self.cache.clear().await?;

        tracing::debug!(kind = T::KIND, "Catalog reset");
        Ok(())
    }

    /// Returns every entity in position order.
    pub async fn get_all(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.cached_data().await
    }

    /// Returns the entity with the given id, or `None` if there is none.
    pub async fn get(&self, id: i64) -> Result<Option<T>> {
        let _guard = self.lock.lock().await;

        let data = self.cached_data().await?;
        Ok(data.into_iter().find(|item| item.id() == Some(id)))
    }

    /// Adds a new entity at the end of the catalog.
    ///
    /// Returns the stored entity with its ids and position assigned.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the entity already has an id.
    pub async fn add(&self, entity: &T) -> Result<T> {
        if let Some(id) = entity.id() {
            return Err(CatalogError::InvalidArgument(format!(
                "{} {} is already persisted",
                T::KIND,
                id
            )));
        }

        let _guard = self.lock.lock().await;

        let mut data = self.cached_data().await?;
        let mut entity = entity.clone();
        entity.set_position(position_at(data.len())?);

        let saved = self.repository.save(&entity).await?;
        data.push(saved.clone());
        self.store(&data).await?;

        tracing::debug!(
            kind = T::KIND,
            id = ?saved.id(),
            position = saved.position(),
            "Entity added"
        );
        Ok(saved)
    }

    /// Persists changes to an existing entity.
    ///
    /// The entity keeps its slot in the list; its position is stored as given
    /// and no other entity is renumbered.
    pub async fn update(&self, entity: &T) -> Result<T> {
        let id = persisted_id(entity, "update")?;

        let _guard = self.lock.lock().await;

        let mut data = self.cached_data().await?;
        let index = index_of(&data, id)?;

        let saved = self.repository.save(entity).await?;
        data[index] = saved.clone();
        self.store(&data).await?;

        tracing::debug!(kind = T::KIND, id, "Entity updated");
        Ok(saved)
    }

    /// Removes an entity and everything it owns.
    ///
    /// Positions of the remaining entities are left as they are; call
    /// [`update_positions`](Self::update_positions) to close the gap.
    pub async fn remove(&self, entity: &T) -> Result<()> {
        let id = persisted_id(entity, "remove")?;

        let _guard = self.lock.lock().await;

        let mut data = self.cached_data().await?;
        self.repository.delete(entity).await?;
        data.retain(|item| item.id() != Some(id));
        self.store(&data).await?;

        tracing::debug!(kind = T::KIND, id, "Entity removed");
        Ok(())
    }

    /// Stores a deep copy of an entity at the end of the catalog.
    ///
    /// Returns the stored copy. The copy and all of its children get fresh ids.
    pub async fn duplicate(&self, entity: &T) -> Result<T> {
        let id = persisted_id(entity, "duplicate")?;

        let _guard = self.lock.lock().await;

        let mut data = self.cached_data().await?;
        let mut copy = (self.copier)(entity);
        copy.set_id(None);
        copy.set_position(position_at(data.len())?);

        let saved = self.repository.save(&copy).await?;
        data.push(saved.clone());
        self.store(&data).await?;

        tracing::debug!(
            kind = T::KIND,
            original = id,
            copy = ?saved.id(),
            position = saved.position(),
            "Entity duplicated"
        );
        Ok(saved)
    }

    /// Swaps an entity with its predecessor.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the entity is already first.
    pub async fn move_up(&self, entity: &T) -> Result<()> {
        let id = persisted_id(entity, "move up")?;

        let _guard = self.lock.lock().await;

        let data = self.cached_data().await?;
        let index = index_of(&data, id)?;
        if index == 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "{} {} is already first",
                T::KIND,
                id
            )));
        }

        self.swap(data, index, index - 1).await
    }

    /// Swaps an entity with its successor.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` if the entity is already last.
    pub async fn move_down(&self, entity: &T) -> Result<()> {
        let id = persisted_id(entity, "move down")?;

        let _guard = self.lock.lock().await;

        let data = self.cached_data().await?;
        let index = index_of(&data, id)?;
        if index + 1 >= data.len() {
            return Err(CatalogError::InvalidArgument(format!(
                "{} {} is already last",
                T::KIND,
                id
            )));
        }

        self.swap(data, index, index + 1).await
    }

    /// Renumbers every entity to `0..N` in list order and saves them as one batch.
    pub async fn update_positions(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut data = self.cached_data().await?;
        for (index, item) in data.iter_mut().enumerate() {
            item.set_position(position_at(index)?);
        }

        let saved = self.repository.save_all(&data).await?;
        self.store(&saved).await?;

        tracing::debug!(kind = T::KIND, count = saved.len(), "Positions updated");
        Ok(())
    }

    /// Returns the cached list, loading it from the repository on a miss.
    async fn cached_data(&self) -> Result<Vec<T>> {
        if let Some(bytes) = self.cache.get(&self.key).await? {
            let data = deserialize_list(&bytes)?;
            tracing::trace!(key = %self.key, "Cache hit");
            return Ok(data);
        }

        tracing::trace!(key = %self.key, "Cache miss");
        let mut data = self.repository.find_all().await?;
        data.sort_by_key(|item| item.position());
        self.store(&data).await?;

        Ok(data)
    }

    /// Replaces the cached list.
    async fn store(&self, data: &[T]) -> Result<()> {
        let bytes = serialize_list(data)?;
        self.cache.set(&self.key, &bytes, self.ttl).await?;
        Ok(())
    }

    /// Swaps positions and list slots of two neighbours and persists both.
    async fn swap(&self, mut data: Vec<T>, index: usize, other: usize) -> Result<()> {
        let position = data[index].position();
        let other_position = data[other].position();
        data[index].set_position(other_position);
        data[other].set_position(position);

        let moved = self.repository.save(&data[index]).await?;
        let displaced = self.repository.save(&data[other]).await?;
        data[index] = moved;
        data[other] = displaced;
        data.swap(index, other);
        self.store(&data).await?;

        tracing::debug!(
            kind = T::KIND,
            id = ?data[other].id(),
            from = position,
            to = other_position,
            "Entity moved"
        );
        Ok(())
    }
}

impl<T, R, C> std::fmt::Debug for OrderedCatalog<T, R, C>
where
    T: Entity,
    R: Repository<T>,
    C: Cache,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedCatalog")
            .field("kind", &T::KIND)
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn persisted_id<T: Entity>(entity: &T, operation: &str) -> Result<i64> {
    entity.id().ok_or_else(|| {
        CatalogError::InvalidArgument(format!("cannot {} an unsaved {}", operation, T::KIND))
    })
}

fn index_of<T: Entity>(data: &[T], id: i64) -> Result<usize> {
    data.iter()
        .position(|item| item.id() == Some(id))
        .ok_or_else(|| {
            CatalogError::InvalidArgument(format!("{} {} is not in the catalog", T::KIND, id))
        })
}

fn position_at(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| {
        CatalogError::InvalidArgument(format!("position {index} does not fit in a catalog"))
    })
}

//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mediashelf_core::catalog::Entity;
use mediashelf_core::storage::{Repository, RepositoryError, Result};

/// In-memory storage backend for one entity type.
///
/// Ids come from a counter that only moves forward, so ids are never reused
/// after a delete.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: Arc<RwLock<BTreeMap<i64, T>>>,
    next_id: Arc<AtomicI64>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn store(&self, items: &mut BTreeMap<i64, T>, entity: &T) -> Result<T> {
        let mut stored = entity.clone();
        if let Some(id) = stored.max_id() {
            self.next_id
                .fetch_max(id.saturating_add(1), Ordering::SeqCst);
        }
        stored.assign_ids(&mut || self.next_id.fetch_add(1, Ordering::SeqCst));

        let id = stored.id().ok_or_else(|| {
            RepositoryError::InvalidData(format!("{} was left without an id", T::KIND))
        })?;
        items.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>> {
        let items = self.items.read().await;
        let mut all: Vec<T> = items.values().cloned().collect();
        // BTreeMap iteration is already in id order, so a stable sort keeps
        // ties ordered by id.
        all.sort_by_key(|item| item.position());
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn save(&self, entity: &T) -> Result<T> {
        let mut items = self.items.write().await;
        self.store(&mut items, entity)
    }

    async fn save_all(&self, entities: &[T]) -> Result<Vec<T>> {
        let mut items = self.items.write().await;
        entities
            .iter()
            .map(|entity| self.store(&mut items, entity))
            .collect()
    }

    async fn delete(&self, entity: &T) -> Result<()> {
        let Some(id) = entity.id() else {
            return Err(RepositoryError::InvalidData(format!(
                "cannot delete an unsaved {}",
                T::KIND
            )));
        };

        let mut items = self.items.write().await;
        if items.remove(&id).is_none() {
            return Err(RepositoryError::not_found(T::KIND, id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.items.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediashelf_core::catalog::Movable;
    use mediashelf_core::media::{Genre, Music, Song};

    fn genre_at(name: &str, position: i32) -> Genre {
        Genre {
            position,
            ..Genre::new(name)
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();

        let first = repo.save(&genre_at("Drama", 0)).await.unwrap();
        let second = repo.save(&genre_at("Comedy", 1)).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn test_find_all_orders_by_position_then_id() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        repo.save(&genre_at("Late", 1)).await.unwrap();
        repo.save(&genre_at("Tie A", 0)).await.unwrap();
        repo.save(&genre_at("Tie B", 0)).await.unwrap();

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();

        assert_eq!(names, vec!["Tie A", "Tie B", "Late"]);
    }

    #[tokio::test]
    async fn test_save_existing_replaces() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        let mut saved = repo.save(&genre_at("Old", 0)).await.unwrap();

        saved.name = "New".to_string();
        repo.save(&saved).await.unwrap();

        let found = repo.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "New");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_assigns_child_ids() {
        let repo: InMemoryRepository<Music> = InMemoryRepository::new();
        let album = Music {
            name: "Album".to_string(),
            songs: vec![Song::default(), Song::default()],
            ..Default::default()
        };

        let saved = repo.save(&album).await.unwrap();

        assert!(saved.id.is_some());
        assert!(saved.songs.iter().all(|song| song.id.is_some()));
        assert_ne!(saved.songs[0].id, saved.songs[1].id);
    }

    #[tokio::test]
    async fn test_explicit_child_id_advances_counter() {
        let repo: InMemoryRepository<Music> = InMemoryRepository::new();
        let imported = repo
            .save(&Music {
                songs: vec![Song {
                    id: Some(20),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .await
            .unwrap();

        let fresh = repo
            .save(&Music {
                songs: vec![Song::default()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(imported.id, Some(21));
        assert_eq!(fresh.id, Some(22));
        assert_eq!(fresh.songs[0].id, Some(23));
    }

    #[tokio::test]
    async fn test_explicit_id_advances_counter() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        repo.save(&Genre {
            id: Some(41),
            ..Genre::new("Imported")
        })
        .await
        .unwrap();

        let next = repo.save(&genre_at("Fresh", 1)).await.unwrap();

        assert_eq!(next.id(), Some(42));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        let saved = repo.save(&genre_at("Gone", 0)).await.unwrap();

        repo.delete(&saved).await.unwrap();

        assert!(repo.find_by_id(saved.id().unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        let ghost = Genre {
            id: Some(9),
            ..Genre::new("Ghost")
        };

        assert_eq!(
            repo.delete(&ghost).await,
            Err(RepositoryError::not_found("Genre", 9))
        );
    }

    #[tokio::test]
    async fn test_delete_unsaved_is_invalid() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();

        let result = repo.delete(&Genre::new("Unsaved")).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_delete_all_never_reuses_ids() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        repo.save(&genre_at("A", 0)).await.unwrap();

        repo.delete_all().await.unwrap();
        let after = repo.save(&genre_at("B", 0)).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert_eq!(after.id(), Some(2));
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let repo: InMemoryRepository<Genre> = InMemoryRepository::new();
        let other = repo.clone();

        repo.save(&genre_at("Shared", 0)).await.unwrap();

        assert_eq!(other.find_all().await.unwrap().len(), 1);
    }
}

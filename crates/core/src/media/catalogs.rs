//! One ordered catalog per media type.
//!
//! Each constructor fixes the cache key and the copy strategy of its type;
//! the repository and cache are supplied by the caller.

use std::sync::Arc;

use crate::cache::{
    Cache, GAMES_KEY, GENRES_KEY, MOVIES_KEY, MUSIC_KEY, PICTURES_KEY, PROGRAMS_KEY, SHOWS_KEY,
};
use crate::catalog::{OrderedCatalog, Result};
use crate::storage::Repository;

use super::copy::{
    copy_game, copy_genre, copy_movie, copy_music, copy_picture, copy_program, copy_show,
};
use super::types::{Game, Genre, Movie, Music, Picture, Program, Show};

pub type MovieCatalog<R, C> = OrderedCatalog<Movie, R, C>;
pub type ShowCatalog<R, C> = OrderedCatalog<Show, R, C>;
pub type MusicCatalog<R, C> = OrderedCatalog<Music, R, C>;
pub type GameCatalog<R, C> = OrderedCatalog<Game, R, C>;
pub type ProgramCatalog<R, C> = OrderedCatalog<Program, R, C>;
pub type GenreCatalog<R, C> = OrderedCatalog<Genre, R, C>;
pub type PictureCatalog<R, C> = OrderedCatalog<Picture, R, C>;

pub fn movies<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<MovieCatalog<R, C>>
where
    R: Repository<Movie>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, MOVIES_KEY, copy_movie)
}

pub fn shows<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<ShowCatalog<R, C>>
where
    R: Repository<Show>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, SHOWS_KEY, copy_show)
}

pub fn music<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<MusicCatalog<R, C>>
where
    R: Repository<Music>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, MUSIC_KEY, copy_music)
}

pub fn games<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<GameCatalog<R, C>>
where
    R: Repository<Game>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, GAMES_KEY, copy_game)
}

pub fn programs<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<ProgramCatalog<R, C>>
where
    R: Repository<Program>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, PROGRAMS_KEY, copy_program)
}

pub fn genres<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<GenreCatalog<R, C>>
where
    R: Repository<Genre>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, GENRES_KEY, copy_genre)
}

pub fn pictures<R, C>(repository: Arc<R>, cache: Arc<C>) -> Result<PictureCatalog<R, C>>
where
    R: Repository<Picture>,
    C: Cache,
{
    OrderedCatalog::new(repository, cache, PICTURES_KEY, copy_picture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::cache::Result as CacheResult;
    use crate::catalog::Entity;
    use crate::storage::Result as RepositoryResult;

    struct EmptyRepository;

    #[async_trait]
    impl<T: Entity> Repository<T> for EmptyRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<T>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> RepositoryResult<Option<T>> {
            Ok(None)
        }

        async fn save(&self, entity: &T) -> RepositoryResult<T> {
            Ok(entity.clone())
        }

        async fn save_all(&self, entities: &[T]) -> RepositoryResult<Vec<T>> {
            Ok(entities.to_vec())
        }

        async fn delete(&self, _entity: &T) -> RepositoryResult<()> {
            Ok(())
        }

        async fn delete_all(&self) -> RepositoryResult<()> {
            Ok(())
        }
    }

    struct NoCache;

    #[async_trait]
    impl Cache for NoCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Ok(())
        }

        async fn clear(&self) -> CacheResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_each_catalog_uses_its_own_key() {
        let repo = Arc::new(EmptyRepository);
        let cache = Arc::new(NoCache);

        let keys = [
            movies(repo.clone(), cache.clone()).unwrap().key().to_string(),
            shows(repo.clone(), cache.clone()).unwrap().key().to_string(),
            music(repo.clone(), cache.clone()).unwrap().key().to_string(),
            games(repo.clone(), cache.clone()).unwrap().key().to_string(),
            programs(repo.clone(), cache.clone()).unwrap().key().to_string(),
            genres(repo.clone(), cache.clone()).unwrap().key().to_string(),
            pictures(repo, cache).unwrap().key().to_string(),
        ];

        assert_eq!(
            keys,
            ["movies", "shows", "music", "games", "programs", "genres", "pictures"]
        );
    }

    #[tokio::test]
    async fn test_show_catalog_duplicates_with_show_strategy() {
        let catalog = shows(Arc::new(EmptyRepository), Arc::new(NoCache)).unwrap();
        let show = Show {
            id: Some(1),
            seasons: vec![crate::media::Season {
                id: Some(2),
                ..Default::default()
            }],
            ..Show::default()
        };

        let copy = catalog.duplicate(&show).await.unwrap();

        assert_eq!(copy.id, None);
        assert_eq!(copy.seasons[0].id, None);
    }
}

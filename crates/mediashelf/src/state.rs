//! The seven catalogs of one process, wired to the compiled-in backends.
//!
//! Every catalog shares one cache instance and, for SQLite, one database
//! connection. Each catalog still has its own lock, so operations on
//! different catalogs run independently.

use std::sync::Arc;
use std::time::Duration;

use mediashelf_core::catalog::{Entity, OrderedCatalog};
use mediashelf_core::media::{
    self, Game, GameCatalog, Genre, GenreCatalog, Movie, MovieCatalog, Music, MusicCatalog,
    Picture, PictureCatalog, Program, ProgramCatalog, Show, ShowCatalog,
};

use crate::cache::ActiveCache;
use crate::config::Config;
use crate::storage::Store;

/// One repository per catalog type.
pub struct Stores {
    pub movies: Arc<Store<Movie>>,
    pub shows: Arc<Store<Show>>,
    pub music: Arc<Store<Music>>,
    pub games: Arc<Store<Game>>,
    pub programs: Arc<Store<Program>>,
    pub genres: Arc<Store<Genre>>,
    pub pictures: Arc<Store<Picture>>,
}

#[cfg(feature = "sqlite")]
mod sqlite_stores {
    use super::*;
    use crate::storage::sqlite::{open_connection, open_in_memory, SqliteRepository};

    impl Stores {
        /// Opens the SQLite database at `config.sqlite_path`.
        ///
        /// `:memory:` gives a private in-memory database.
        pub async fn open(config: &Config) -> anyhow::Result<Self> {
            let conn = if config.sqlite_path == ":memory:" {
                open_in_memory().await?
            } else {
                open_connection(&config.sqlite_path).await?
            };
            tracing::info!(path = %config.sqlite_path, "Opened SQLite storage");

            Ok(Self {
                movies: Arc::new(SqliteRepository::new(conn.clone())),
                shows: Arc::new(SqliteRepository::new(conn.clone())),
                music: Arc::new(SqliteRepository::new(conn.clone())),
                games: Arc::new(SqliteRepository::new(conn.clone())),
                programs: Arc::new(SqliteRepository::new(conn.clone())),
                genres: Arc::new(SqliteRepository::new(conn.clone())),
                pictures: Arc::new(SqliteRepository::new(conn)),
            })
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_stores {
    use super::*;
    use crate::storage::inmemory::InMemoryRepository;

    impl Stores {
        /// Creates empty in-memory repositories; nothing outlives the process.
        pub async fn open(_config: &Config) -> anyhow::Result<Self> {
            tracing::info!("Using in-memory storage");

            Ok(Self {
                movies: Arc::new(InMemoryRepository::new()),
                shows: Arc::new(InMemoryRepository::new()),
                music: Arc::new(InMemoryRepository::new()),
                games: Arc::new(InMemoryRepository::new()),
                programs: Arc::new(InMemoryRepository::new()),
                genres: Arc::new(InMemoryRepository::new()),
                pictures: Arc::new(InMemoryRepository::new()),
            })
        }
    }
}

/// Creates the compiled-in cache backend.
#[cfg(feature = "memory")]
pub async fn connect_cache(config: &Config) -> anyhow::Result<ActiveCache> {
    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    Ok(crate::cache::MemoryCache::new(config.cache_max_entries))
}

/// Creates the compiled-in cache backend.
#[cfg(feature = "redis")]
pub async fn connect_cache(config: &Config) -> anyhow::Result<ActiveCache> {
    let cache =
        crate::cache::RedisCache::new(&config.redis_url, config.redis_key_prefix.clone()).await?;
    tracing::info!(url = %config.redis_url, prefix = %config.redis_key_prefix, "Connected to Redis cache");
    Ok(cache)
}

/// Every catalog of the application.
pub struct Catalogs {
    pub movies: MovieCatalog<Store<Movie>, ActiveCache>,
    pub shows: ShowCatalog<Store<Show>, ActiveCache>,
    pub music: MusicCatalog<Store<Music>, ActiveCache>,
    pub games: GameCatalog<Store<Game>, ActiveCache>,
    pub programs: ProgramCatalog<Store<Program>, ActiveCache>,
    pub genres: GenreCatalog<Store<Genre>, ActiveCache>,
    pub pictures: PictureCatalog<Store<Picture>, ActiveCache>,
}

impl Catalogs {
    /// Opens storage and cache as configured and builds every catalog.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let stores = Stores::open(config).await?;
        let cache = Arc::new(connect_cache(config).await?);
        Self::assemble(stores, cache, config.cache_ttl())
    }

    /// Builds every catalog over the given repositories and shared cache.
    pub fn assemble(
        stores: Stores,
        cache: Arc<ActiveCache>,
        ttl: Option<Duration>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            movies: expiring(media::movies(stores.movies, Arc::clone(&cache))?, ttl),
            shows: expiring(media::shows(stores.shows, Arc::clone(&cache))?, ttl),
            music: expiring(media::music(stores.music, Arc::clone(&cache))?, ttl),
            games: expiring(media::games(stores.games, Arc::clone(&cache))?, ttl),
            programs: expiring(media::programs(stores.programs, Arc::clone(&cache))?, ttl),
            genres: expiring(media::genres(stores.genres, Arc::clone(&cache))?, ttl),
            pictures: expiring(media::pictures(stores.pictures, cache)?, ttl),
        })
    }
}

fn expiring<T, R, C>(
    catalog: OrderedCatalog<T, R, C>,
    ttl: Option<Duration>,
) -> OrderedCatalog<T, R, C>
where
    T: Entity,
    R: mediashelf_core::storage::Repository<T>,
    C: mediashelf_core::cache::Cache,
{
    match ttl {
        Some(ttl) => catalog.with_ttl(ttl),
        None => catalog,
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use mediashelf_core::cache::{Cache, GENRES_KEY, MOVIES_KEY};
    use mediashelf_core::catalog::{is_contiguous, Movable};

    fn test_config() -> Config {
        Config {
            cache_ttl_seconds: 0,
            cache_max_entries: 16,
            sqlite_path: ":memory:".to_string(),
            redis_url: String::new(),
            redis_key_prefix: String::new(),
        }
    }

    fn genre(name: &str) -> Genre {
        Genre::new(name)
    }

    async fn names(catalogs: &Catalogs) -> Vec<String> {
        catalogs
            .genres
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect()
    }

    #[tokio::test]
    async fn test_catalog_keys() {
        let catalogs = Catalogs::from_config(&test_config()).await.unwrap();

        let keys = [
            catalogs.movies.key(),
            catalogs.shows.key(),
            catalogs.music.key(),
            catalogs.games.key(),
            catalogs.programs.key(),
            catalogs.genres.key(),
            catalogs.pictures.key(),
        ];

        assert_eq!(
            keys,
            ["movies", "shows", "music", "games", "programs", "genres", "pictures"]
        );
    }

    #[tokio::test]
    async fn test_add_move_remove_scenario() {
        let catalogs = Catalogs::from_config(&test_config()).await.unwrap();

        let a = catalogs.genres.add(&genre("A")).await.unwrap();
        let b = catalogs.genres.add(&genre("B")).await.unwrap();
        catalogs.genres.add(&genre("C")).await.unwrap();

        catalogs.genres.move_up(&b).await.unwrap();
        assert_eq!(names(&catalogs).await, vec!["B", "A", "C"]);

        let a = catalogs.genres.get(a.id().unwrap()).await.unwrap().unwrap();
        catalogs.genres.remove(&a).await.unwrap();
        catalogs.genres.update_positions().await.unwrap();

        let all = catalogs.genres.get_all().await.unwrap();
        assert_eq!(names(&catalogs).await, vec!["B", "C"]);
        assert!(is_contiguous(&all));
    }

    #[tokio::test]
    async fn test_catalogs_share_cache_under_distinct_keys() {
        let stores = Stores::open(&test_config()).await.unwrap();
        let cache = Arc::new(crate::cache::MemoryCache::new(16));
        let catalogs = Catalogs::assemble(stores, Arc::clone(&cache), None).unwrap();

        catalogs.genres.add(&genre("Drama")).await.unwrap();
        catalogs.movies.get_all().await.unwrap();

        assert!(cache.get(GENRES_KEY).await.unwrap().is_some());
        assert!(cache.get(MOVIES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reset_empties_catalog() {
        let catalogs = Catalogs::from_config(&test_config()).await.unwrap();
        catalogs.genres.add(&genre("A")).await.unwrap();

        catalogs.genres.new_data().await.unwrap();

        assert!(catalogs.genres.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_show_through_backends() {
        let catalogs = Catalogs::from_config(&test_config()).await.unwrap();
        let show = catalogs
            .shows
            .add(&Show {
                czech_name: "Show".to_string(),
                seasons: vec![mediashelf_core::media::Season {
                    number: 1,
                    episodes: vec![mediashelf_core::media::Episode::default()],
                    ..Default::default()
                }],
                ..Default::default()
            })
            .await
            .unwrap();

        let copy = catalogs.shows.duplicate(&show).await.unwrap();

        assert_ne!(copy.id, show.id);
        assert_ne!(copy.seasons[0].id, show.seasons[0].id);
        assert_ne!(
            copy.seasons[0].episodes[0].id,
            show.seasons[0].episodes[0].id
        );
        assert_eq!(copy.position, 1);
        assert_eq!(catalogs.shows.get_all().await.unwrap().len(), 2);
    }
}

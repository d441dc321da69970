mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    namespaced_key, tracking_key, ALL_KEYS, GAMES_KEY, GENRES_KEY, MOVIES_KEY, MUSIC_KEY,
    PICTURES_KEY, PROGRAMS_KEY, SHOWS_KEY,
};
pub use serialization::{deserialize_list, serialize_list};
pub use traits::Cache;

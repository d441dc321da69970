//! Cache keys, one per catalog type.
//!
//! Each key holds the whole materialized list for its type. Keys are fixed
//! at construction of the owning catalog and never change.

pub const MOVIES_KEY: &str = "movies";
pub const SHOWS_KEY: &str = "shows";
pub const MUSIC_KEY: &str = "music";
pub const GAMES_KEY: &str = "games";
pub const PROGRAMS_KEY: &str = "programs";
pub const GENRES_KEY: &str = "genres";
pub const PICTURES_KEY: &str = "pictures";

/// Every catalog key, in display order.
pub const ALL_KEYS: [&str; 7] = [
    MOVIES_KEY,
    SHOWS_KEY,
    MUSIC_KEY,
    GAMES_KEY,
    PROGRAMS_KEY,
    GENRES_KEY,
    PICTURES_KEY,
];

/// Returns `key` under a namespace prefix (e.g. `"mediashelf:movies"`).
///
/// An empty prefix leaves the key untouched.
///
/// # Examples
///
/// ```
/// use mediashelf_core::cache::namespaced_key;
///
/// assert_eq!(namespaced_key("mediashelf", "movies"), "mediashelf:movies");
/// assert_eq!(namespaced_key("", "movies"), "movies");
/// ```
pub fn namespaced_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}:{}", prefix, key)
    }
}

/// Returns the key of the set that tracks every key written under `prefix`.
pub fn tracking_key(prefix: &str) -> String {
    namespaced_key(prefix, "_keys")
}

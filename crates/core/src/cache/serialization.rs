//! Pure functions for serializing/deserializing cached lists to/from bytes.
//!
//! Cached lists are stored as JSON so cache values stay human-readable and
//! easy to inspect from a Redis shell.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheError, Result};

/// Serializes a list of entities to JSON bytes.
pub fn serialize_list<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    serde_json::to_vec(items).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes to a list of entities.
pub fn deserialize_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

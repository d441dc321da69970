use thiserror::Error;

use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Errors returned by catalog operations.
///
/// Storage and cache failures are passed through untouched so callers see
/// exactly what the backend reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A caller-side precondition was violated. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`
//! from `mediashelf_core::storage`.

use mediashelf_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - Constraint violations → `RepositoryError::InvalidData`
/// - Unreadable documents → `RepositoryError::Serialization`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            RepositoryError::InvalidData(format!("Constraint violation for {entity_type}: {err}"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(format!("Unreadable {entity_type} document: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: "unknown".to_string(),
        },

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a rusqlite error with a known ID to a RepositoryError.
fn map_rusqlite_error_with_id(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        _ => map_rusqlite_error(err, entity_type),
    }
}

/// Maps errors raised inside a `Connection::call` closure that are not
/// SQLite errors: repository errors pass through, JSON errors become
/// `Serialization`.
fn map_other_error(err: &(dyn std::error::Error + Send + Sync + 'static)) -> RepositoryError {
    if let Some(repository_err) = err.downcast_ref::<RepositoryError>() {
        return repository_err.clone();
    }
    if let Some(json_err) = err.downcast_ref::<serde_json::Error>() {
        return RepositoryError::Serialization(json_err.to_string());
    }
    RepositoryError::QueryFailed(err.to_string())
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type)
        }
        tokio_rusqlite::Error::Other(other) => map_other_error(&**other),
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
///
/// Use this variant when the entity ID is known at the call site.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: i64,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error_with_id(rusqlite_err, entity_type, &id.to_string())
        }
        _ => map_tokio_rusqlite_error(err, entity_type),
    }
}

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
pub fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Helper to carry a non-SQLite error out of a tokio_rusqlite closure.
pub fn wrap_other<E>(e: E) -> tokio_rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    tokio_rusqlite::Error::Other(Box::new(e))
}

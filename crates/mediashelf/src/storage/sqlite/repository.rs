//! SQLite repository implementation.
//!
//! Implements `mediashelf_core::storage::Repository` for every catalog
//! entity type over one shared connection.

use std::marker::PhantomData;

use async_trait::async_trait;
use rusqlite::{params, Transaction};
use tokio_rusqlite::Connection;

use mediashelf_core::catalog::Entity;
use mediashelf_core::storage::{Repository, RepositoryError, Result};

use super::conversions::{row_to_entity, to_document};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id, wrap_err, wrap_other};
use super::schema;

/// Opens (or creates) a database file and makes sure the schema exists.
pub async fn open_connection(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

    init_schema(&conn).await?;

    Ok(conn)
}

/// Opens an in-memory database with the schema created.
///
/// Data is lost when the last clone of the connection is dropped.
pub async fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

    init_schema(&conn).await?;

    Ok(conn)
}

async fn init_schema(conn: &Connection) -> Result<()> {
    conn.call(|conn| {
        conn.execute_batch(schema::CREATE_TABLES)
            .map_err(wrap_err)?;
        Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
}

/// Inserts or replaces one aggregate, assigning ids from the kind's sequence.
fn upsert<T: Entity>(tx: &Transaction<'_>, entity: &T) -> tokio_rusqlite::Result<T> {
    let mut next_id: i64 = tx
        .query_row(schema::SELECT_NEXT_ID, [T::KIND], |row| row.get(0))
        .map_err(wrap_err)?;

    let mut stored = entity.clone();
    if let Some(id) = stored.max_id() {
        next_id = next_id.max(id.saturating_add(1));
    }
    stored.assign_ids(&mut || {
        let id = next_id;
        next_id += 1;
        id
    });

    let Some(id) = stored.id() else {
        return Err(wrap_other(RepositoryError::InvalidData(format!(
            "{} was left without an id",
            T::KIND
        ))));
    };
    let document = to_document(&stored).map_err(wrap_other)?;

    tx.execute(
        schema::UPSERT_ENTRY,
        params![T::KIND, id, stored.position(), document],
    )
    .map_err(wrap_err)?;
    tx.execute(schema::UPSERT_NEXT_ID, params![T::KIND, next_id])
        .map_err(wrap_err)?;

    Ok(stored)
}

/// SQLite-based repository for one entity type.
///
/// Cloning shares the underlying connection.
pub struct SqliteRepository<T> {
    conn: Connection,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SqliteRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository").finish_non_exhaustive()
    }
}

impl<T: Entity> SqliteRepository<T> {
    /// Creates a repository over a connection from [`open_connection`] or
    /// [`open_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for SqliteRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ENTRIES).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([T::KIND], row_to_entity::<T>)
                    .map_err(wrap_err)?;

                let mut entities = Vec::new();
                for row_result in rows {
                    entities.push(row_result.map_err(wrap_err)?);
                }
                Ok(entities)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ENTRY_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row(params![T::KIND, id], row_to_entity::<T>) {
                    Ok(entity) => Ok(Some(entity)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, T::KIND, id))
    }

    async fn save(&self, entity: &T) -> Result<T> {
        let entity = entity.clone();

        let stored = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let stored = upsert(&tx, &entity)?;
                tx.commit().map_err(wrap_err)?;
                Ok(stored)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND))?;

        tracing::trace!(kind = T::KIND, id = ?stored.id(), "Saved entity");
        Ok(stored)
    }

    async fn save_all(&self, entities: &[T]) -> Result<Vec<T>> {
        let entities = entities.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut stored = Vec::with_capacity(entities.len());
                for entity in &entities {
                    stored.push(upsert(&tx, entity)?);
                }
                tx.commit().map_err(wrap_err)?;
                Ok(stored)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND))
    }

    async fn delete(&self, entity: &T) -> Result<()> {
        let Some(id) = entity.id() else {
            return Err(RepositoryError::InvalidData(format!(
                "cannot delete an unsaved {}",
                T::KIND
            )));
        };

        self.conn
            .call(move |conn| {
                let rows_affected = conn
                    .execute(schema::DELETE_ENTRY, params![T::KIND, id])
                    .map_err(wrap_err)?;
                if rows_affected == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, T::KIND, id))
    }

    async fn delete_all(&self) -> Result<()> {
        let deleted = self
            .conn
            .call(|conn| {
                conn.execute(schema::DELETE_ENTRIES, [T::KIND])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND))?;

        tracing::debug!(kind = T::KIND, deleted, "Deleted all entities");
        Ok(())
    }
}

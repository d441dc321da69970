//! SQLite row conversion functions.
//!
//! Pure functions between rows and catalog entities, testable without a
//! database.

use rusqlite::types::Type;
use rusqlite::Row;

use mediashelf_core::catalog::Entity;

/// Convert a SQLite row to an entity.
///
/// Expected columns: id, position, document. The `id` and `position` columns
/// win over whatever the document carries.
pub fn row_to_entity<T: Entity>(row: &Row) -> rusqlite::Result<T> {
    let id: i64 = row.get(0)?;
    let position: i32 = row.get(1)?;
    let document: String = row.get(2)?;

    let mut entity = parse_document::<T>(&document)?;
    entity.set_id(Some(id));
    entity.set_position(position);
    Ok(entity)
}

/// Parse a stored JSON document.
pub fn parse_document<T: Entity>(document: &str) -> rusqlite::Result<T> {
    serde_json::from_str(document)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))
}

/// Serialize an entity into its stored JSON document.
pub fn to_document<T: Entity>(entity: &T) -> serde_json::Result<String> {
    serde_json::to_string(entity)
}

//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- One row per catalog root; owned children live inside `document`
CREATE TABLE IF NOT EXISTS catalog_entries (
    kind TEXT NOT NULL,
    id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    document TEXT NOT NULL,
    PRIMARY KEY (kind, id)
);

-- Next free id per kind, shared by roots and their children
CREATE TABLE IF NOT EXISTS id_sequences (
    kind TEXT PRIMARY KEY,
    next_id INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_catalog_entries_position ON catalog_entries(kind, position);
"#;

pub const SELECT_ENTRIES: &str = r#"
SELECT id, position, document
FROM catalog_entries
WHERE kind = ?1
ORDER BY position, id
"#;

pub const SELECT_ENTRY_BY_ID: &str = r#"
SELECT id, position, document
FROM catalog_entries
WHERE kind = ?1 AND id = ?2
"#;

pub const UPSERT_ENTRY: &str = r#"
INSERT INTO catalog_entries (kind, id, position, document)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(kind, id) DO UPDATE SET
    position = excluded.position,
    document = excluded.document
"#;

pub const DELETE_ENTRY: &str = r#"
DELETE FROM catalog_entries
WHERE kind = ?1 AND id = ?2
"#;

pub const DELETE_ENTRIES: &str = r#"
DELETE FROM catalog_entries
WHERE kind = ?1
"#;

/// Never hands out an id below one already stored, even if the sequence row
/// is missing or behind.
pub const SELECT_NEXT_ID: &str = r#"
SELECT MAX(
    COALESCE((SELECT next_id FROM id_sequences WHERE kind = ?1), 1),
    COALESCE((SELECT MAX(id) + 1 FROM catalog_entries WHERE kind = ?1), 1)
)
"#;

pub const UPSERT_NEXT_ID: &str = r#"
INSERT INTO id_sequences (kind, next_id)
VALUES (?1, ?2)
ON CONFLICT(kind) DO UPDATE SET next_id = excluded.next_id
"#;

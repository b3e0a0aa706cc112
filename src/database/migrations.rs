//! Versioned schema for the bookmark tree.
//!
//! Applied versions are listed in `schema_version`; `run_all` applies the
//! missing ones in order.

use rusqlite::{params, Connection};

use crate::types::bookmark::BookmarkRoot;

/// Highest version `run_all` knows how to apply.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Latest applied version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Brings the schema up to `CURRENT_SCHEMA_VERSION`. Idempotent.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);

    if current < 1 {
        migration_v1(conn)?;
        record_version(conn, 1, "Bookmark tree tables and well-known roots")?;
    }

    Ok(())
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        params![version, now(), description],
    )?;
    Ok(())
}

/// V1: folders and bookmarks share one position space per parent so the
/// list can interleave them.
fn migration_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bookmark_folders (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            parent_id TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (parent_id) REFERENCES bookmark_folders(id)
        );

        CREATE TABLE IF NOT EXISTS bookmarks (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            title TEXT NOT NULL,
            preview_image_url TEXT NOT NULL DEFAULT '',
            folder_id TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            FOREIGN KEY (folder_id) REFERENCES bookmark_folders(id)
        );

        CREATE INDEX IF NOT EXISTS idx_bookmark_folders_parent ON bookmark_folders(parent_id);
        CREATE INDEX IF NOT EXISTS idx_bookmarks_folder ON bookmarks(folder_id);
        ",
    )?;

    let created = now();
    let root = BookmarkRoot::Root;
    conn.execute(
        "INSERT OR IGNORE INTO bookmark_folders (id, title, parent_id, position, created_at, updated_at) \
         VALUES (?1, ?2, NULL, 0, ?3, ?3)",
        params![root.guid(), root.title(), created],
    )?;

    let children = [
        BookmarkRoot::Mobile,
        BookmarkRoot::Menu,
        BookmarkRoot::Toolbar,
        BookmarkRoot::Unfiled,
    ];
    for (position, child) in children.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO bookmark_folders (id, title, parent_id, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![child.guid(), child.title(), root.guid(), position as i64, created],
        )?;
    }
    Ok(())
}

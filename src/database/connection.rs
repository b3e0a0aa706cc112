//! The SQLite handle behind bookmark storage.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use super::migrations;

/// Waiting on a lock held by another process before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the SQLite connection backing bookmark storage.
///
/// The schema is always migrated to `CURRENT_SCHEMA_VERSION` before a
/// `Database` is handed out.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens or creates the database file at `path`.
    ///
    /// # Errors
    /// Fails when the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::migrated(conn, Some(path))
    }

    /// Opens a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?, None)
    }

    fn migrated(conn: Connection, path: Option<PathBuf>) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        tracing::debug!(
            path = ?path,
            version = migrations::get_schema_version(&conn),
            "bookmark database ready"
        );
        Ok(Self { conn, path })
    }

    /// File backing this database, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema_version(&self) -> i32 {
        migrations::get_schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

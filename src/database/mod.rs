// Database layer: the SQLite connection and the versioned schema holding the
// bookmark tree (folders, bookmarks and the five well-known roots).

pub mod connection;
pub mod migrations;

pub use connection::Database;

use serde::{Deserialize, Serialize};

use super::bookmark::BookmarkRoot;

/// Top-level application settings, stored as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub bookmarks: BookmarksSettings,
    pub rpc: RpcSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// File name of the SQLite database inside the data directory.
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "bookmarks.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarksSettings {
    /// Folder opened when the screen starts.
    pub start_folder: String,
}

impl Default for BookmarksSettings {
    fn default() -> Self {
        Self {
            start_folder: BookmarkRoot::Mobile.guid().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcSettings {
    pub max_requests_per_second: u32,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            max_requests_per_second: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "bookmarks_screen=info".to_string(),
        }
    }
}

use thiserror::Error;

// === StorageError ===

/// Errors raised by the bookmarks storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No bookmark or folder has the given guid.
    #[error("Bookmark item not found: {0}")]
    NotFound(String),
    /// The target folder does not exist.
    #[error("Bookmark folder not found: {0}")]
    FolderNotFound(String),
    /// Well-known roots can't be renamed, moved or deleted.
    #[error("Bookmark root is read-only: {0}")]
    ReadOnlyRoot(String),
    /// A folder can't become a descendant of itself.
    #[error("Cannot move folder {folder} into {target}")]
    InvalidMove { folder: String, target: String },
    #[error("Bookmark database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// === SettingsError ===

/// Errors related to loading, saving or editing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O error: {0}")]
    IoError(String),
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === AppError ===

/// Failures while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open database: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

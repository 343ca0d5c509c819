//! Error types for snapshot persistence.

use thiserror::Error;

/// Errors that can occur while saving or recovering a snapshot.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot has no `images` array
    #[error("Snapshot has no images array")]
    MissingImages,

    /// Snapshot written by a newer version
    #[error("Snapshot version {found} is newer than supported version {supported}")]
    VersionTooNew {
        /// Version found in the snapshot
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Storage backend unavailable
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FormatError {
    /// Create a storage error with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

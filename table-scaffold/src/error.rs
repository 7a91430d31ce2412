//! Error types and error handling

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Scaffold error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Destination exists and already has entries
    #[error("Destination folder {} already exists and is not empty", path.display())]
    DestinationNotEmpty {
        /// Destination root
        path: PathBuf,
    },

    /// Destination exists but is a file or other non-directory entry
    #[error("Destination {} exists and is not a directory", path.display())]
    DestinationNotDirectory {
        /// Destination root
        path: PathBuf,
    },

    /// The destination could not be inspected
    #[error("Failed to inspect destination {}: {source}", path.display())]
    Destination {
        /// Destination root
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A template document could not be read
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        /// Template path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A static file could not be copied
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file
        from: PathBuf,
        /// Destination file
        to: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A directory could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A generated file could not be written
    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Walking the static template tree failed
    #[error("Failed to walk template tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The copied `package.json` could not be patched
    #[error("Invalid package manifest {}: {reason}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Schema input is malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Schema file could not be read
    #[error("Failed to read schema file {}: {source}", path.display())]
    SchemaFile {
        /// Schema file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Schema introspection query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ScaffoldError {
    /// Whether this error was raised before anything was written
    ///
    /// Precondition and input errors leave the destination untouched, so the
    /// generator must not clean up after them.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::DestinationNotEmpty { .. }
                | Self::DestinationNotDirectory { .. }
                | Self::Destination { .. }
                | Self::Schema(_)
                | Self::SchemaFile { .. }
                | Self::Database(_)
        )
    }
}

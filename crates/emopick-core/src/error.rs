//! Error types for `emopick-core`.
//!
//! The catalog pipeline itself never fails: bad input degrades to empty
//! output. Only the edges that touch the file system (configuration and
//! custom library files) return [`CoreResult<T>`].

use std::path::PathBuf;

/// Unified error type for the fallible edges of the core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to read the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Failed to parse a library definition file.
    #[error("library parse error: {0}")]
    LibraryParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `emopick-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reads a UTF-8 file, mapping the common I/O failures onto [`CoreError`].
pub(crate) fn read_file(path: &std::path::Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(e),
    })
}

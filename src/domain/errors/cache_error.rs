//! Disk cache error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors raised while writing to or clearing the cache directory.
///
/// A cache miss is not an error; lookups return `None` instead.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CacheError {
    #[error("failed to create cache directory {path}: {message}")]
    CreateDir { path: PathBuf, message: String },

    #[error("failed to write cache entry {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("failed to remove cache entry {path}: {message}")]
    Remove { path: PathBuf, message: String },

    #[error("failed to read cache directory {path}: {message}")]
    ReadDir { path: PathBuf, message: String },

    #[error("cache task failed: {message}")]
    TaskFailed { message: String },
}

impl CacheError {
    /// Creates directory creation error.
    #[must_use]
    pub fn create_dir(path: &Path, message: impl ToString) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Creates write error.
    #[must_use]
    pub fn write(path: &Path, message: impl ToString) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Creates removal error.
    #[must_use]
    pub fn remove(path: &Path, message: impl ToString) -> Self {
        Self::Remove {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Creates directory listing error.
    #[must_use]
    pub fn read_dir(path: &Path, message: impl ToString) -> Self {
        Self::ReadDir {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

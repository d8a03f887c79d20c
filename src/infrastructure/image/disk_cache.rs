//! Disk-based image cache: one file per source, named by its cache key.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::entities::SourceId;
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::ImageCachePort;
use crate::infrastructure::config::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

static SHARED: OnceLock<Arc<DiskImageCache>> = OnceLock::new();

/// Disk-based image cache that persists raw image bytes.
///
/// The directory listing is the index; there is no manifest. Writes go
/// through a temporary file that is renamed into place, so readers never
/// observe a partially written entry.
#[derive(Debug, Clone)]
pub struct DiskImageCache {
    cache_dir: PathBuf,
}

impl DiskImageCache {
    /// Creates a cache rooted at `cache_dir`. The directory is created on the first write.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Creates a cache in the default location (`<cache dir>/lazyimg/images`).
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(default_cache_dir())
    }

    /// Returns the process-wide cache at the default location.
    pub fn shared() -> Arc<Self> {
        SHARED
            .get_or_init(|| Arc::new(Self::default_location()))
            .clone()
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the file path for a source's entry.
    #[must_use]
    pub fn entry_path(&self, source: &SourceId) -> PathBuf {
        self.cache_dir.join(source.cache_key().as_str())
    }

    /// Checks if a source is cached.
    pub async fn contains(&self, source: &SourceId) -> bool {
        fs::try_exists(self.entry_path(source))
            .await
            .unwrap_or(false)
    }

    /// Returns the number of files in the cache directory.
    pub async fn len(&self) -> usize {
        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            return 0;
        };

        let mut count = 0;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.file_type().await.is_ok_and(|t| t.is_file()) {
                count += 1;
            }
        }
        count
    }

    /// Returns true if the cache holds no files.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn write_atomic(dir: &Path, path: &Path, data: &Bytes) -> CacheResult<()> {
        std::fs::create_dir_all(dir).map_err(|e| CacheError::create_dir(dir, e))?;

        let mut temp_file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| CacheError::write(path, e))?;
        temp_file
            .write_all(data)
            .map_err(|e| CacheError::write(path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| CacheError::write(path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| CacheError::write(path, e.error))?;

        Ok(())
    }
}

#[async_trait]
impl ImageCachePort for DiskImageCache {
    async fn get(&self, source: &SourceId) -> Option<Bytes> {
        let path = self.entry_path(source);
        match fs::read(&path).await {
            Ok(bytes) => {
                trace!(source = %source, path = %path.display(), "Disk cache hit");
                Some(Bytes::from(bytes))
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(source = %source, error = %e, "Unreadable cache entry, treating as miss");
                }
                trace!(source = %source, "Disk cache miss");
                None
            }
        }
    }

    async fn put(&self, source: &SourceId, data: Bytes) -> CacheResult<()> {
        let dir = self.cache_dir.clone();
        let path = self.entry_path(source);
        let size = data.len();

        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomic(&dir, &target, &data))
            .await
            .map_err(|e| CacheError::TaskFailed {
                message: e.to_string(),
            })??;

        debug!(source = %source, path = %path.display(), size, "Stored image in disk cache");
        Ok(())
    }

    async fn clear_one(&self, source: &SourceId) {
        let path = self.entry_path(source);
        match fs::remove_file(&path).await {
            Ok(()) => debug!(source = %source, "Removed disk cache entry"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(source = %source, error = %e, "Failed to remove disk cache entry"),
        }
    }

    async fn clear_all(&self) -> CacheResult<()> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::read_dir(&self.cache_dir, e)),
        };

        let mut removed = 0usize;
        let mut first_error = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::read_dir(&self.cache_dir, e))?
        {
            if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove cache file");
                    first_error.get_or_insert_with(|| CacheError::remove(&path, e));
                }
            }
        }

        debug!(removed, dir = %self.cache_dir.display(), "Cleared disk cache");
        first_error.map_or(Ok(()), Err)
    }
}

/// Returns the default cache directory path.
fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
        || std::env::temp_dir().join(APP_NAME).join("images"),
        |dirs| dirs.cache_dir().join("images"),
    )
}

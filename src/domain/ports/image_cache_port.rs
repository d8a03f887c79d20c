//! Port definition for the image byte cache.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::SourceId;
use crate::domain::errors::CacheResult;

/// Keyed byte store for downloaded images.
/// Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageCachePort: Send + Sync {
    /// Returns cached bytes for the source, or None on a miss.
    async fn get(&self, source: &SourceId) -> Option<Bytes>;

    /// Stores bytes for the source, replacing any previous entry.
    async fn put(&self, source: &SourceId, data: Bytes) -> CacheResult<()>;

    /// Removes the entry for the source. A missing entry is not an error.
    async fn clear_one(&self, source: &SourceId);

    /// Removes every entry.
    async fn clear_all(&self) -> CacheResult<()>;
}

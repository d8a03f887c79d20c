//! Port definition for fetching image bytes from the network.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::SourceId;
use crate::domain::errors::FetchResult;

/// Single opaque asynchronous download.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the bytes named by the source.
    async fn fetch(&self, source: &SourceId) -> FetchResult<Bytes>;
}

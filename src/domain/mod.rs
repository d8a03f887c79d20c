//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CacheKey, ImageSource, LoadStatus, SourceId};
pub use errors::{CacheError, CacheResult, FetchError, FetchResult};
pub use ports::{ImageCachePort, ImageDisplayPort, ImageFetcherPort};

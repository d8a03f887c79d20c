//! Image handling infrastructure.
//!
//! This module provides:
//! - Disk caching keyed by source hash
//! - HTTP downloading of image bytes

pub mod disk_cache;
pub mod http_fetcher;

pub use disk_cache::DiskImageCache;
pub use http_fetcher::HttpImageFetcher;

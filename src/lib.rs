//! lazyimg - lazy, disk-cached loading of remote images.
//!
//! A [`LazyImageLoader`](application::LazyImageLoader) resolves an image source
//! from the disk cache first and only goes to the network on a miss, storing
//! what it downloads and handing the bytes to a display surface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the loader and display adapters.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the disk cache, HTTP fetcher, and configuration.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "lazyimg";

//! Infrastructure layer with adapters for the filesystem and the network.

/// Application configuration.
pub mod config;
/// Image caching and downloading.
pub mod image;

pub use config::{AppConfig, CliArgs, Command, HttpConfig, LogLevel, StorageManager};
pub use image::{DiskImageCache, HttpImageFetcher};

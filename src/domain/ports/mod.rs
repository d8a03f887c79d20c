mod image_cache_port;
mod image_display_port;
mod image_fetcher_port;

pub use image_cache_port::ImageCachePort;
pub use image_display_port::ImageDisplayPort;
pub use image_fetcher_port::ImageFetcherPort;

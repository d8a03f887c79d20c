//! Application layer with the image loader and display adapters.

/// Loader and display services.
pub mod services;

pub use services::{ChannelDisplay, ImageDeliveredEvent, LazyImageLoader};

pub mod channel_display;
pub mod lazy_image_loader;

pub use channel_display::{ChannelDisplay, ImageDeliveredEvent};
pub use lazy_image_loader::LazyImageLoader;

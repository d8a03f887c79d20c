//! Domain entity definitions.

mod image;
mod source;

pub use image::{ImageSource, LoadStatus};
pub use source::{CacheKey, SourceId};

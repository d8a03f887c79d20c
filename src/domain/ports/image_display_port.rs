//! Port definition for the surface that shows loaded images.

use bytes::Bytes;

use crate::domain::entities::SourceId;

/// Receives image bytes once they are resolved.
///
/// Runs on the loader's resolution task. Implementations may query or
/// reassign the loader that is delivering to them.
pub trait ImageDisplayPort: Send + Sync {
    /// Shows the resolved bytes for the source.
    fn display(&self, source: &SourceId, bytes: Bytes);
}

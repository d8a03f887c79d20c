//! Display adapter that forwards deliveries to a channel.

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::SourceId;
use crate::domain::ports::ImageDisplayPort;

/// Message sent when a loader delivers an image.
#[derive(Debug, Clone)]
pub struct ImageDeliveredEvent {
    /// The source the bytes belong to.
    pub source: SourceId,
    /// The image bytes.
    pub bytes: Bytes,
}

/// Forwards each delivery as an [`ImageDeliveredEvent`] so the receiving
/// side can update its view on its own task.
#[derive(Debug, Clone)]
pub struct ChannelDisplay {
    event_tx: mpsc::UnboundedSender<ImageDeliveredEvent>,
}

impl ChannelDisplay {
    /// Creates a display that sends on `event_tx`.
    #[must_use]
    pub const fn new(event_tx: mpsc::UnboundedSender<ImageDeliveredEvent>) -> Self {
        Self { event_tx }
    }

    /// Creates a display together with the receiving end of its channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ImageDeliveredEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self::new(event_tx), event_rx)
    }
}

impl ImageDisplayPort for ChannelDisplay {
    fn display(&self, source: &SourceId, bytes: Bytes) {
        let event = ImageDeliveredEvent {
            source: source.clone(),
            bytes,
        };
        if self.event_tx.send(event).is_err() {
            trace!(source = %source, "Display receiver dropped");
        }
    }
}

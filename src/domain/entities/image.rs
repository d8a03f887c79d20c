//! Domain types describing where an image is in the loading pipeline.

/// Where delivered image bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Read from the disk cache.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// State of a lazy image loader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No source set.
    #[default]
    Idle,
    /// Looking up the cache or waiting on the network.
    Resolving,
    /// Bytes were handed to the display.
    Delivered(ImageSource),
    /// The fetch failed; nothing was delivered.
    Failed(String),
}

impl LoadStatus {
    /// Returns true if no source is set.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while a resolution is in flight.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// Returns true once bytes were delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true once the current resolution reached a terminal state.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.is_delivered() || self.is_failed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(LoadStatus::default().is_idle());
        assert!(LoadStatus::Resolving.is_resolving());
        assert!(!LoadStatus::Resolving.is_settled());
        assert!(LoadStatus::Delivered(ImageSource::Network).is_settled());
        assert!(LoadStatus::Failed("HTTP 404".into()).is_settled());
        assert!(LoadStatus::Failed("HTTP 404".into()).is_failed());
    }

    #[test]
    fn test_image_source_display() {
        assert_eq!(ImageSource::DiskCache.to_string(), "disk");
        assert_eq!(ImageSource::Network.to_string(), "network");
    }
}

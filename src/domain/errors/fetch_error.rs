//! Network fetch error types.

use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Fetch error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("invalid image source: {reason}")]
    InvalidSource { reason: String },

    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("failed to read body: {message}")]
    Body { message: String },

    #[error("failed to create HTTP client: {message}")]
    Client { message: String },
}

impl FetchError {
    /// Creates invalid source error.
    #[must_use]
    pub fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            reason: reason.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates body read error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body {
            message: message.into(),
        }
    }

    /// Returns whether setting the same source again could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Body { .. } => true,
            Self::Status { status } => *status >= 500 || *status == 429 || *status == 408,
            Self::InvalidSource { .. } | Self::Client { .. } => false,
        }
    }
}

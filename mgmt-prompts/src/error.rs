//! Error types for prompt partial operations.

use mgmt_transport::TransportError;
use thiserror::Error;

/// Errors returned by [`crate::PromptPartialManager`].
#[derive(Debug, Error)]
pub enum PartialError {
    /// The prompt type failed local validation; nothing was sent.
    #[error(transparent)]
    InvalidPrompt(#[from] mgmt_primitives::Error),

    /// The partial could not be encoded as JSON.
    #[error("failed to encode prompt partial: {source}")]
    Encode {
        /// Source [`serde_json::Error`].
        source: serde_json::Error,
    },

    /// The response body was not a prompt partial.
    #[error("failed to decode prompt partial: {source}")]
    Decode {
        /// Source [`serde_json::Error`].
        source: serde_json::Error,
    },

    /// The transport reported a failure; passed through as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PartialError {
    /// Returns `true` if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::InvalidPrompt(_) | Self::Encode { .. })
    }
}

/// Result alias for prompt partial operations.
pub type PartialResult<T> = Result<T, PartialError>;

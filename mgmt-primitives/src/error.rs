//! Shared error definitions for management primitives.

use thiserror::Error;

/// Result alias used throughout the management client.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing primitive types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The supplied value is not one of the supported prompt types.
    #[error("invalid custom prompt: {value}")]
    InvalidPromptType {
        /// The offending prompt type string.
        value: String,
    },
}

impl Error {
    /// Convenience constructor for unknown prompt types.
    #[must_use]
    pub fn invalid_prompt_type(value: impl Into<String>) -> Self {
        Self::InvalidPromptType {
            value: value.into(),
        }
    }
}

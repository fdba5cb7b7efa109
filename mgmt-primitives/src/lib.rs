//! Core shared types for the management API client.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod partial;
mod prompt;

/// Error type and result alias shared across the SDK.
pub use error::{Error, Result};
/// Markup slots injected into authentication pages.
pub use partial::{PartialMarkup, PromptPartial};
/// Authentication screens that accept custom partials.
pub use prompt::{IntoPromptType, PromptType};

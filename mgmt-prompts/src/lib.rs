//! Custom prompt partials for authentication pages.
//!
//! [`PromptPartialManager`] reads and writes the markup injected into the
//! sign-up and login screens. Every call validates the prompt type locally
//! and then issues exactly one request through the shared [`Transport`].
//!
//! [`Transport`]: mgmt_transport::Transport

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod manager;

pub use error::{PartialError, PartialResult};
pub use manager::PromptPartialManager;
pub use mgmt_primitives::{IntoPromptType, PartialMarkup, PromptPartial, PromptType};

//! Management API client SDK facade.
//!
//! Depend on this crate to get the transport, the shared primitives, and the
//! resource managers enabled through cargo features. [`Management`] owns a
//! single transport and hands out managers that share it.

#![warn(missing_docs, clippy::pedantic)]

use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// Re-export shared primitives for convenience.
pub use mgmt_primitives as primitives;

/// Transport, configuration, and request options.
pub use mgmt_transport as transport;

/// Custom prompt partials (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use mgmt_prompts as prompts;

use mgmt_transport::{HyperTransport, ManagementConfig, Transport, TransportResult};

/// Entry point bundling one shared transport.
#[derive(Clone)]
pub struct Management {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Management {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Management").finish_non_exhaustive()
    }
}

impl Management {
    /// Connects over HTTPS using the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`mgmt_transport::TransportError::Configuration`] if the
    /// configuration is incomplete.
    pub fn new(config: ManagementConfig) -> TransportResult<Self> {
        let transport = HyperTransport::new(config)?;
        debug!(base_url = transport.base_url(), "management client ready");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds a client on top of a caller-provided transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Returns the custom prompt partials manager.
    #[cfg(feature = "prompts")]
    #[must_use]
    pub fn prompt_partials(&self) -> prompts::PromptPartialManager {
        prompts::PromptPartialManager::new(self.transport())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_token() {
        let err = Management::new(ManagementConfig::new("tenant.example.com"))
            .expect_err("missing token");
        assert!(matches!(
            err,
            transport::TransportError::Configuration { .. }
        ));
    }

    #[test]
    fn new_accepts_complete_config() {
        let config = ManagementConfig::new("tenant.example.com").with_token("token");
        assert!(Management::new(config).is_ok());
    }
}

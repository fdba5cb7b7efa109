//! Transport layer shared by the management API resource managers.
//!
//! Resource managers build an [`ApiRequest`] and hand it to a [`Transport`].
//! [`https::HyperTransport`] is the production implementation; tests and
//! embedders can substitute their own.

#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod https;
pub mod request;
pub mod traits;

pub use config::ManagementConfig;
pub use https::HyperTransport;
pub use request::{Method, RequestOption, uri};
pub use traits::{ApiRequest, ApiResponse, Transport, TransportError, TransportResult};

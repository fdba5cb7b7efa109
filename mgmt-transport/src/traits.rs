//! Transport trait and the data exchanged through it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

use crate::request::{Method, RequestOption};

/// Result alias used by transports.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced while talking to the management API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Transport is misconfigured or missing credentials.
    #[error("transport not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The request could not be assembled (bad header, body encoding, etc.).
    #[error("invalid management request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be built.
        reason: String,
    },

    /// Connection or protocol failure before a response was received.
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The request did not complete within the allotted time.
    #[error("management request timed out after {after:?}")]
    Timeout {
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The API rejected the request due to rate limiting.
    #[error("management API rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Suggested delay before retrying, when the API supplied one.
        retry_after: Option<Duration>,
    },

    /// The API answered with a non-success status.
    #[error("management API returned {status} {error}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Short error name reported by the API.
        error: String,
        /// Human-readable message reported by the API.
        message: String,
    },
}

impl TransportError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for API status errors.
    #[must_use]
    pub fn api(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code when the API produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// A single request against a path relative to the management API root.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Relative resource path, e.g. `prompts/login/partials`.
    pub path: String,
    /// JSON payload, if any.
    pub body: Option<Value>,
    /// Caller-supplied options, forwarded untouched.
    pub options: Vec<RequestOption>,
}

impl ApiRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            options: Vec::new(),
        }
    }

    /// Attaches a JSON payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends request options.
    #[must_use]
    pub fn with_options(mut self, options: &[RequestOption]) -> Self {
        self.options.extend_from_slice(options);
        self
    }
}

/// Successful response returned by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Raw response body.
    pub body: Bytes,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response carrying the serialized JSON value.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// Creates a `204 No Content` response.
    #[must_use]
    pub fn no_content() -> Self {
        Self::new(204, Bytes::new())
    }
}

/// Executes requests against the management API.
///
/// Implementations return only 2xx responses; every other outcome is a
/// [`TransportError`]. Transports must be safe to share across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and waits for the response.
    async fn execute(&self, request: ApiRequest) -> TransportResult<ApiResponse>;
}

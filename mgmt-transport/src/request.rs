//! Request building blocks: methods, caller options, and path construction.

use std::fmt;
use std::time::Duration;

/// HTTP methods used by the management API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method token as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for hyper::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Per-request option supplied by the caller and honoured by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOption {
    /// Sets (or replaces) a request header.
    Header {
        /// Header name.
        name: String,
        /// Header value.
        value: String,
    },
    /// Appends a query string parameter.
    Query {
        /// Parameter name.
        key: String,
        /// Parameter value.
        value: String,
    },
    /// Overrides the transport's default timeout for this request.
    Timeout(Duration),
}

impl RequestOption {
    /// Sets a request header.
    #[must_use]
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Query {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Bounds the request duration.
    #[must_use]
    pub const fn timeout(after: Duration) -> Self {
        Self::Timeout(after)
    }
}

/// Joins path segments into a relative resource path.
///
/// Each segment is percent-escaped so it can never introduce extra path
/// components or a query string.
#[must_use]
pub fn uri<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| escape_segment(segment.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

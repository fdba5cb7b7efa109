//! Connection settings for the management API.

use std::{env, fmt, time::Duration};

use hyper::Uri;

use crate::traits::{TransportError, TransportResult};

/// Environment variable holding the tenant domain.
pub const MANAGEMENT_DOMAIN_ENV: &str = "MANAGEMENT_DOMAIN";

/// Environment variable holding the management API access token.
pub const MANAGEMENT_API_TOKEN_ENV: &str = "MANAGEMENT_API_TOKEN";

/// Path of the management API below the tenant domain.
const API_ROOT: &str = "api/v2/";

/// Configuration for [`crate::HyperTransport`].
#[derive(Clone)]
pub struct ManagementConfig {
    domain: String,
    base_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for ManagementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementConfig")
            .field("domain", &self.domain)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ManagementConfig {
    /// Creates a configuration for the supplied tenant domain.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            base_url: None,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("mgmt-transport/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Loads the domain and token from `MANAGEMENT_DOMAIN` and
    /// `MANAGEMENT_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut cfg = Self::new(env::var(MANAGEMENT_DOMAIN_ENV).unwrap_or_default());
        cfg.token = env::var(MANAGEMENT_API_TOKEN_ENV).ok();
        cfg
    }

    /// Overrides the API root URL instead of deriving it from the domain.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> TransportResult<Self> {
        self.base_url = Some(sanitize_base_url(base_url.as_ref())?);
        Ok(self)
    }

    /// Supplies the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the default request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the configured bearer token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolves the API root URL, always ending in `/`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Configuration`] if neither a base URL nor a
    /// usable domain was configured.
    pub fn base_url(&self) -> TransportResult<String> {
        if let Some(base) = &self.base_url {
            return Ok(base.clone());
        }

        let domain = self.domain.trim().trim_end_matches('/');
        if domain.is_empty() {
            return Err(TransportError::configuration(
                "management domain is required when no base URL is set",
            ));
        }

        let root = if domain.starts_with("http://") || domain.starts_with("https://") {
            format!("{domain}/{API_ROOT}")
        } else {
            format!("https://{domain}/{API_ROOT}")
        };
        sanitize_base_url(&root)
    }
}

fn sanitize_base_url(input: &str) -> TransportResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(TransportError::configuration(
            "management base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>().map_err(|err| {
        TransportError::configuration(format!("invalid management base URL: {err}"))
    })?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_base_url_from_domain() {
        let cfg = ManagementConfig::new("tenant.example.com");
        assert_eq!(
            cfg.base_url().unwrap(),
            "https://tenant.example.com/api/v2/"
        );
    }

    #[test]
    fn keeps_explicit_scheme_on_domain() {
        let cfg = ManagementConfig::new("http://localhost:8080/");
        assert_eq!(cfg.base_url().unwrap(), "http://localhost:8080/api/v2/");
    }

    #[test]
    fn base_url_requires_scheme() {
        let err = ManagementConfig::new("tenant.example.com")
            .with_base_url("tenant.example.com/api/v2")
            .expect_err("missing scheme should error");

        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn base_url_override_gains_trailing_slash() {
        let cfg = ManagementConfig::new("ignored")
            .with_base_url("http://127.0.0.1:9000/api/v2")
            .expect("valid URL");
        assert_eq!(cfg.base_url().unwrap(), "http://127.0.0.1:9000/api/v2/");
    }

    #[test]
    fn empty_domain_is_rejected() {
        let err = ManagementConfig::new("  ").base_url().expect_err("no domain");
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ManagementConfig::new("tenant.example.com").with_token("super-secret");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

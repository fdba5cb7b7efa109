//! HTTPS transport backed by hyper and rustls.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use hyper::body::to_bytes;
use hyper::client::HttpConnector;
use hyper::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, RETRY_AFTER, USER_AGENT,
};
use hyper::{Body, Client, HeaderMap, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, warn};
use webpki_roots::TLS_SERVER_ROOTS;

use crate::config::ManagementConfig;
use crate::request::RequestOption;
use crate::traits::{ApiRequest, ApiResponse, Transport, TransportError, TransportResult};

type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Transport that calls the management API over HTTPS.
pub struct HyperTransport {
    client: HyperClient,
    base_url: String,
    token: String,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Constructs a transport from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Configuration`] if the token is missing or the
    /// base URL cannot be resolved.
    pub fn new(config: ManagementConfig) -> TransportResult<Self> {
        let token = config
            .token()
            .ok_or_else(|| TransportError::configuration("management API token is required"))?
            .to_owned();
        let base_url = config.base_url()?;

        Ok(Self {
            client: build_https_client(),
            base_url,
            token,
            timeout: config.timeout(),
            user_agent: config.user_agent().to_owned(),
        })
    }

    /// Returns the resolved API root URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_uri(&self, path: &str, query: &[(String, String)]) -> TransportResult<Uri> {
        let mut target = format!("{}{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query).map_err(|err| {
                TransportError::invalid_request(format!("failed to encode query: {err}"))
            })?;
            target.push('?');
            target.push_str(&encoded);
        }
        target.parse::<Uri>().map_err(|err| {
            TransportError::invalid_request(format!("invalid request URI `{target}`: {err}"))
        })
    }

    fn build_request(&self, request: ApiRequest) -> TransportResult<(Request<Body>, Duration)> {
        let ApiRequest {
            method,
            path,
            body,
            options,
        } = request;

        let mut deadline = self.timeout;
        let mut query = Vec::new();
        let mut headers = HeaderMap::new();
        for option in options {
            match option {
                RequestOption::Header { name, value } => {
                    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                        TransportError::invalid_request(format!("invalid header name: {err}"))
                    })?;
                    let value = HeaderValue::from_str(&value).map_err(|err| {
                        TransportError::invalid_request(format!("invalid header value: {err}"))
                    })?;
                    headers.insert(name, value);
                }
                RequestOption::Query { key, value } => query.push((key, value)),
                RequestOption::Timeout(after) => deadline = after,
            }
        }

        let mut builder = Request::builder()
            .method(hyper::Method::from(method))
            .uri(self.build_uri(&path, &query)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.as_str());

        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                let encoded = serde_json::to_vec(&value).map_err(|err| {
                    TransportError::invalid_request(format!("failed to encode body: {err}"))
                })?;
                Body::from(encoded)
            }
            None => Body::empty(),
        };

        if let Some(defaults) = builder.headers_mut() {
            for (name, value) in &headers {
                defaults.insert(name.clone(), value.clone());
            }
        }

        let request = builder.body(body).map_err(|err| {
            TransportError::invalid_request(format!("failed to build request: {err}"))
        })?;
        Ok((request, deadline))
    }

    async fn send(
        &self,
        request: Request<Body>,
    ) -> TransportResult<(StatusCode, HeaderMap, Bytes)> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|err| TransportError::transport(format!("request failed: {err}")))?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body())
            .await
            .map_err(|err| TransportError::transport(format!("failed to read response: {err}")))?;
        Ok((status, headers, bytes))
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();
        let (request, deadline) = self.build_request(request)?;

        debug!(%method, %path, "sending management request");
        let (status, headers, body) = timeout(deadline, self.send(request))
            .await
            .map_err(|_| TransportError::Timeout { after: deadline })??;

        if status.is_success() {
            debug!(%method, %path, status = status.as_u16(), "management request succeeded");
            return Ok(ApiResponse::new(status.as_u16(), body));
        }

        warn!(%method, %path, status = status.as_u16(), "management request rejected");
        Err(map_error_status(status, &headers, &body))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    error: String,
    message: String,
}

fn map_error_status(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> TransportError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return TransportError::RateLimited { retry_after };
    }

    let fallback = status.canonical_reason().unwrap_or("Unknown Status");
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.message.is_empty() || !envelope.error.is_empty() => {
            let error = if envelope.error.is_empty() {
                fallback.to_owned()
            } else {
                envelope.error
            };
            TransportError::api(status.as_u16(), error, envelope.message)
        }
        _ => TransportError::api(
            status.as_u16(),
            fallback,
            String::from_utf8_lossy(body).trim().to_owned(),
        ),
    }
}

fn build_https_client() -> HyperClient {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let connector = HttpsConnector::from((http, Arc::new(config)));
    Client::builder().build::<_, Body>(connector)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::Method;

    fn transport() -> HyperTransport {
        let config = ManagementConfig::new("tenant.example.com").with_token("test-token");
        HyperTransport::new(config).expect("transport")
    }

    #[test]
    fn token_is_required() {
        let err = HyperTransport::new(ManagementConfig::new("tenant.example.com"))
            .expect_err("token required");
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn request_carries_defaults_and_options() {
        let transport = transport();
        let request = ApiRequest::new(Method::Post, "prompts/signup/partials")
            .with_body(json!({ "form-content-start": "<div>" }))
            .with_options(&[
                RequestOption::query("include", "all fields"),
                RequestOption::header("x-request-id", "abc"),
                RequestOption::timeout(Duration::from_secs(2)),
            ]);

        let (request, deadline) = transport.build_request(request).expect("request");

        assert_eq!(deadline, Duration::from_secs(2));
        assert_eq!(request.method(), hyper::Method::POST);
        assert_eq!(
            request.uri().to_string(),
            "https://tenant.example.com/api/v2/prompts/signup/partials?include=all+fields"
        );
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer test-token");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers()["x-request-id"], "abc");
    }

    #[test]
    fn header_option_replaces_default() {
        let transport = transport();
        let request = ApiRequest::new(Method::Get, "prompts/login/partials")
            .with_options(&[RequestOption::header("user-agent", "custom/1.0")]);

        let (request, deadline) = transport.build_request(request).expect("request");

        assert_eq!(deadline, Duration::from_secs(30));
        assert_eq!(request.headers().get_all(USER_AGENT).iter().count(), 1);
        assert_eq!(request.headers()[USER_AGENT], "custom/1.0");
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn invalid_header_is_rejected() {
        let request = ApiRequest::new(Method::Get, "prompts/login/partials")
            .with_options(&[RequestOption::header("bad header", "x")]);
        let err = transport().build_request(request).expect_err("bad header");
        assert!(matches!(err, TransportError::InvalidRequest { .. }));
    }

    #[test]
    fn maps_error_envelope() {
        let body = br#"{"statusCode":400,"error":"Bad Request","message":"Payload validation error"}"#;
        let err = map_error_status(StatusCode::BAD_REQUEST, &HeaderMap::new(), body);
        assert!(matches!(
            err,
            TransportError::Api { status: 400, ref error, ref message }
                if error == "Bad Request" && message == "Payload validation error"
        ));
    }

    #[test]
    fn maps_plain_text_error() {
        let err = map_error_status(StatusCode::BAD_GATEWAY, &HeaderMap::new(), b"upstream down");
        assert!(matches!(
            err,
            TransportError::Api { status: 502, ref error, ref message }
                if error == "Bad Gateway" && message == "upstream down"
        ));
    }

    #[test]
    fn maps_rate_limit_with_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        let err = map_error_status(StatusCode::TOO_MANY_REQUESTS, &headers, b"");
        assert!(matches!(
            err,
            TransportError::RateLimited { retry_after: Some(after) } if after == Duration::from_secs(7)
        ));
    }
}

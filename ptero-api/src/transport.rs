//! Shared HTTP transport for the Pterodactyl client API.
//!
//! One `HttpTransport` is built per client and handed to every manager behind
//! an `Arc`. Its base URL and header set are fixed at construction, so it can
//! be used from any number of concurrent calls without coordination.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ptero_core::config::{AuthDetails, PanelConfig};
use ptero_core::constants;
use ptero_core::error::{ErrorEnvelope, PteroError, PteroResult, PterodactylError};

/// Transport-level knobs. Neither affects the fixed header set.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Accept self-signed TLS certificates from the panel.
    pub accept_invalid_certs: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_millis(constants::DEFAULT_TIMEOUT_MS)),
            accept_invalid_certs: false,
        }
    }
}

impl From<&PanelConfig> for TransportOptions {
    fn from(config: &PanelConfig) -> Self {
        Self {
            timeout: (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms)),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, Copy)]
pub enum RequestBody<'a> {
    Empty,
    Json(&'a serde_json::Value),
    /// Raw text, sent as `text/plain` (file writes).
    Text(&'a str),
}

/// Pre-configured request handle bound to one panel.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    /// Base URL exactly as supplied by the caller.
    base_url: String,
    /// Headers attached to every request.
    headers: HeaderMap,
}

impl HttpTransport {
    /// Build the transport for the given credentials.
    ///
    /// Credentials are assumed to be validated already; the only failure left
    /// is an API key that cannot be carried in a header.
    pub fn new(auth: &AuthDetails, options: &TransportOptions) -> PteroResult<Self> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", auth.api_key))
            .map_err(|e| PteroError::Config(format!("API key is not a valid header value: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(constants::JSON_CONTENT_TYPE),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(constants::JSON_CONTENT_TYPE));

        let mut builder = Client::builder()
            .default_headers(headers.clone())
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION));

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        // Handle self-signed certificates
        if options.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| PteroError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url: auth.base_url.clone(),
            headers,
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The fixed header set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }

    /// Build the full URL for a path, appending query pairs.
    ///
    /// The base URL is concatenated as-is; an unparseable result is a
    /// configuration error since no URL check runs at construction.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> PteroResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| PteroError::Config(format!("invalid request URL {raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    fn build_request(&self, method: Method, url: Url, body: RequestBody<'_>) -> RequestBuilder {
        let builder = self.inner.request(method, url);
        match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Text(text) => builder
                .header(CONTENT_TYPE, "text/plain")
                .body(text.to_string()),
        }
    }

    /// Issue one request and map non-success statuses to `PterodactylError`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody<'_>,
    ) -> PteroResult<Response> {
        let url = self.url(path, query)?;
        debug!("{} {}", method, path);

        let response = self
            .build_request(method.clone(), url, body)
            .send()
            .await
            .map_err(Self::classify_error)?;

        Self::check_status(&method, path, response).await
    }

    // --- Public HTTP methods ---

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> PteroResult<Response> {
        self.send(Method::GET, path, &[], RequestBody::Empty).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> PteroResult<Response> {
        self.send(Method::GET, path, query, RequestBody::Empty).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> PteroResult<Response> {
        self.send(Method::POST, path, &[], RequestBody::Json(body)).await
    }

    /// Execute a POST request with no body.
    pub async fn post_empty(&self, path: &str) -> PteroResult<Response> {
        self.send(Method::POST, path, &[], RequestBody::Empty).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> PteroResult<Response> {
        self.send(Method::PUT, path, &[], RequestBody::Json(body)).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> PteroResult<Response> {
        self.send(Method::DELETE, path, &[], RequestBody::Empty).await
    }

    // --- Response helpers ---

    /// Deserialize a response body.
    pub async fn parse_response<T: DeserializeOwned>(response: Response) -> PteroResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| PteroError::Serialization(format!("failed to parse response: {e}")))
    }

    /// Read a response body as text.
    pub async fn response_text(response: Response) -> PteroResult<String> {
        response
            .text()
            .await
            .map_err(|e| PteroError::Http(format!("failed to read response body: {e}")))
    }

    /// Convenience: GET + parse.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PteroResult<T> {
        let resp = self.get(path).await?;
        Self::parse_response(resp).await
    }

    /// Convenience: GET with query + parse.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> PteroResult<T> {
        let resp = self.get_query(path, query).await?;
        Self::parse_response(resp).await
    }

    /// Convenience: POST + parse.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> PteroResult<T> {
        let resp = self.post(path, body).await?;
        Self::parse_response(resp).await
    }

    /// Check the HTTP status code and convert error bodies to `PterodactylError`.
    async fn check_status(method: &Method, path: &str, response: Response) -> PteroResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = panel_error(status, &body);
        warn!(
            "{} {} returned {}: {} ({})",
            method, path, status.as_u16(), err.code, err.detail
        );
        Err(PteroError::Pterodactyl(err))
    }

    /// Classify a reqwest error into a PteroError variant.
    fn classify_error(e: reqwest::Error) -> PteroError {
        if e.is_timeout() {
            PteroError::Timeout(e.to_string())
        } else if e.is_connect() {
            PteroError::Http(format!("connection failed: {e}"))
        } else {
            PteroError::Http(e.to_string())
        }
    }
}

/// Build a `PterodactylError` from an error response body.
///
/// Uses the panel's `errors` envelope when present; otherwise synthesizes an
/// error from the HTTP status so every non-success response classifies the
/// same way.
fn panel_error(status: StatusCode, body: &str) -> PterodactylError {
    if let Some(err) = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(ErrorEnvelope::into_error)
    {
        return err;
    }

    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    let detail = if body.trim().is_empty() {
        reason.to_string()
    } else {
        body.trim().to_string()
    };
    PterodactylError::new("HttpException", status.as_u16().to_string(), detail)
}

//! HTTP client for Admin API communication.
//!
//! This module provides the [`HttpClient`] type, which sends authenticated
//! JSON POSTs and absorbs rate limiting with bounded exponential backoff.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError, RetriesExhaustedError};
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::{backoff_delay, RetryState, MAX_TRIES};
use crate::config::{AccessToken, PricingConfig};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one shop and one access token.
///
/// The client handles:
/// - Base URI construction from the shop domain or the configured `api_host`
/// - Default headers: `User-Agent`, `Accept`, `Content-Type` and the token
/// - Retrying rate-limited attempts (see [`crate::clients::retry`])
///
/// Network errors and other non-2xx statuses are returned immediately.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_b2b_pricing::{AccessToken, PricingConfig, ShopDomain};
/// use shopify_b2b_pricing::clients::HttpClient;
///
/// let config = PricingConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .build()?;
/// let token = AccessToken::new("shpat_...")?;
///
/// let client = HttpClient::new("/admin/api/2025-10", &config, &token)?;
/// let response = client.post_json("graphql.json", &serde_json::json!({"query": "{ shop { name } }"})).await?;
/// ```
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., `/admin/api/2025-10`).
    base_path: String,
    default_headers: HashMap<String, String>,
}

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: HashMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(key, value)| {
                let value = if key == ACCESS_TOKEN_HEADER {
                    "*****"
                } else {
                    value.as_str()
                };
                (key.as_str(), value)
            })
            .collect();

        f.debug_struct("HttpClient")
            .field("base_uri", &self.base_uri)
            .field("base_path", &self.base_path)
            .field("default_headers", &headers)
            .finish_non_exhaustive()
    }
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be built (e.g. TLS backend initialization failure).
    pub fn new(
        base_path: impl Into<String>,
        config: &PricingConfig,
        token: &AccessToken,
    ) -> Result<Self, HttpError> {
        let base_path = base_path.into();
        let shop = config.shop().as_ref();

        let base_uri = config.api_host().map_or_else(
            || format!("https://{shop}"),
            |host| host.origin().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Shopify B2B Pricing v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(ACCESS_TOKEN_HEADER.to_string(), token.as_ref().to_string());

        // Proxy scenario: the origin changes, the shop stays in Host
        if config.api_host().is_some() {
            default_headers.insert("Host".to_string(), shop.to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// POSTs a JSON body to `path` (relative to the base path).
    ///
    /// Rate-limited attempts are retried up to [`MAX_TRIES`] in total with
    /// exponential backoff.
    ///
    /// # Errors
    ///
    /// - [`HttpError::RetriesExhausted`] if every attempt was rate limited
    /// - [`HttpError::Response`] for any other non-2xx status
    /// - [`HttpError::MalformedBody`] if a 2xx body is not JSON
    /// - [`HttpError::Network`] for transport failures
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}/{}", self.base_uri, self.base_path, path);
        let payload = body.to_string();

        let mut state = RetryState::Attempting(0);
        loop {
            match state {
                RetryState::Attempting(attempt) => {
                    tracing::debug!(%url, attempt, "Sending Admin API request");
                    let response = self.send_once(&url, &payload).await?;

                    if !response.is_rate_limited() {
                        return Self::finish(response);
                    }

                    state = RetryState::after_rate_limit(attempt, response);
                    if matches!(state, RetryState::Attempting(_)) {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            "Rate limit hit (attempt {} of {}). Retrying in {}ms",
                            attempt + 1,
                            MAX_TRIES,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                RetryState::RateLimitExhausted(response) => {
                    tracing::warn!("Rate limit persisted across {} attempts", MAX_TRIES);
                    return Err(HttpError::RetriesExhausted(RetriesExhaustedError {
                        code: response.code,
                        tries: MAX_TRIES,
                        message: Self::serialize_error(&response),
                        error_reference: response.request_id().map(String::from),
                    }));
                }
            }
        }
    }

    async fn send_once(&self, url: &str, payload: &str) -> Result<HttpResponse, HttpError> {
        let mut req_builder = self.client.post(url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder.body(payload.to_string()).send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(e) if (200..=299).contains(&code) => {
                    return Err(HttpError::MalformedBody {
                        code,
                        message: e.to_string(),
                    });
                }
                // Error pages are often HTML; keep the text for the error message
                Err(_) => serde_json::json!({ "raw_body": body_text }),
            }
        };

        Ok(HttpResponse::new(code, headers, body))
    }

    fn finish(response: HttpResponse) -> Result<HttpResponse, HttpError> {
        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code: response.code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Renders the error-bearing parts of a response body as compact JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for field in ["errors", "error", "error_description", "raw_body"] {
            if let Some(value) = response.body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::Value::Object(error_body).to_string()
    }
}

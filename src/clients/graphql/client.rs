//! Throttled GraphQL client for the Shopify Admin API.

use crate::clients::graphql::{GraphqlError, ThrottleStatus};
use crate::clients::{HttpClient, HttpResponse};
use crate::config::{AccessToken, ApiVersion, PricingConfig};

/// GraphQL client for the Admin API with built-in backpressure.
///
/// Each [`execute`](Self::execute) call is one logical query:
///
/// 1. POST to `/admin/api/<version>/graphql.json`
/// 2. Rate-limited attempts (HTTP 429, `THROTTLED`) are retried with
///    exponential backoff by the underlying [`HttpClient`]
/// 3. Once a response is accepted, the cost extension is inspected and the
///    call sleeps if the bucket is below the reserve
/// 4. The `data` payload is returned
///
/// The client knows nothing about catalogs or prices.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_b2b_pricing::{AccessToken, GraphqlClient, PricingConfig, ShopDomain};
/// use serde_json::json;
///
/// let config = PricingConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .build()?;
/// let token = AccessToken::new("shpat_...")?;
/// let client = GraphqlClient::new(&config, &token)?;
///
/// let data = client
///     .execute(
///         "query Product($id: ID!) { product(id: $id) { title } }",
///         Some(json!({ "id": "gid://shopify/Product/111" })),
///     )
///     .await?;
/// println!("{}", data["product"]["title"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client for the configured shop, authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &PricingConfig, token: &AccessToken) -> Result<Self, GraphqlError> {
        let api_version = config.api_version();
        if api_version.is_deprecated() {
            tracing::warn!(
                "Admin API version {} is outside Shopify's support window; minimum supported is {}",
                api_version,
                ApiVersion::minimum_supported()
            );
        }

        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, config, token)?;

        Ok(Self {
            http_client,
            api_version,
        })
    }

    /// Returns the API version used by this client.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a query and returns its `data` payload.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for transport failures, non-2xx statuses and
    ///   exhausted rate-limit retries
    /// - [`GraphqlError::Query`] when the response has `errors` and no `data`
    /// - [`GraphqlError::MissingData`] when it has neither
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self.http_client.post_json("graphql.json", &body).await?;

        if let Some(delay) = ThrottleStatus::from_body(&response.body).and_then(|s| s.wait_time()) {
            tracing::info!(
                "Throttling: waiting {}ms for query cost budget to restore",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        Self::extract_data(response)
    }

    fn extract_data(response: HttpResponse) -> Result<serde_json::Value, GraphqlError> {
        let mut body = response.body;
        let messages = Self::error_messages(&body);

        match body.get_mut("data").map(serde_json::Value::take) {
            Some(data) if !data.is_null() => {
                if !messages.is_empty() {
                    tracing::warn!(
                        errors = ?messages,
                        "GraphQL response returned partial data with errors"
                    );
                }
                Ok(data)
            }
            _ if !messages.is_empty() => Err(GraphqlError::Query { messages }),
            _ => Err(GraphqlError::MissingData),
        }
    }

    fn error_messages(body: &serde_json::Value) -> Vec<String> {
        body.get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .map(|error| {
                        error
                            .get("message")
                            .and_then(serde_json::Value::as_str)
                            .map_or_else(|| error.to_string(), String::from)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

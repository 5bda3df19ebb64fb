//! HTTP response type for the Admin API.

use std::collections::HashMap;

/// GraphQL error code Shopify uses when the cost bucket is empty.
const THROTTLED_CODE: &str = "THROTTLED";

/// A response from the Admin API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased names (a header may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if this attempt was rejected for rate limiting.
    ///
    /// That is HTTP 429, or a 200 whose GraphQL `errors` carry
    /// `extensions.code == "THROTTLED"`.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.code == 429 || self.has_throttled_error()
    }

    fn has_throttled_error(&self) -> bool {
        self.body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .is_some_and(|errors| {
                errors.iter().any(|error| {
                    error.pointer("/extensions/code").and_then(serde_json::Value::as_str)
                        == Some(THROTTLED_CODE)
                })
            })
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(code: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    #[test]
    fn test_is_ok_covers_2xx_only() {
        assert!(response(200, json!({})).is_ok());
        assert!(response(299, json!({})).is_ok());
        assert!(!response(199, json!({})).is_ok());
        assert!(!response(429, json!({})).is_ok());
    }

    #[test]
    fn test_429_is_rate_limited() {
        assert!(response(429, json!({})).is_rate_limited());
        assert!(!response(500, json!({})).is_rate_limited());
    }

    #[test]
    fn test_throttled_graphql_error_is_rate_limited() {
        let body = json!({
            "errors": [{
                "message": "Throttled",
                "extensions": { "code": "THROTTLED", "documentation": "https://shopify.dev/api/usage/rate-limits" }
            }]
        });
        assert!(response(200, body).is_rate_limited());
    }

    #[test]
    fn test_other_graphql_errors_are_not_rate_limited() {
        let body = json!({
            "errors": [{ "message": "Field 'foo' doesn't exist", "extensions": { "code": "undefinedField" } }]
        });
        assert!(!response(200, body).is_rate_limited());

        // REST-style string errors
        assert!(!response(401, json!({ "errors": "Invalid API key" })).is_rate_limited());
    }

    #[test]
    fn test_request_id_reads_lowercase_header() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));

        assert_eq!(response.request_id(), Some("abc-123"));
    }
}

//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: a non-2xx response that is not retried
//! - [`RetriesExhaustedError`]: every attempt was rate limited
//! - [`HttpError`]: unified error for the transport layer
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_b2b_pricing::clients::HttpError;
//!
//! match client.request(body).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::RetriesExhausted(e)) => println!("gave up after {} tries", e.tries),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MalformedBody { code, .. }) => println!("bad body with {code}"),
//!     Err(HttpError::Network(e)) => println!("network: {e}"),
//! }
//! ```

use thiserror::Error;

/// A non-successful response that is not eligible for retry.
///
/// `message` is a compact JSON rendering of the response's `errors` /
/// `error` fields plus the request id, so it can be logged as-is.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from `X-Request-Id`).
    pub error_reference: Option<String>,
}

/// Every attempt of a request was rate limited.
///
/// Raised once the fixed attempt ceiling is reached. Rate limiting covers both
/// HTTP 429 and GraphQL `THROTTLED` errors.
#[derive(Debug, Error)]
#[error("Rate limited on all {tries} attempts. Last message: {message}")]
pub struct RetriesExhaustedError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of attempts made.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from `X-Request-Id`).
    pub error_reference: Option<String>,
}

/// Unified error type for the transport layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response that is not retried.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The attempt ceiling was reached while rate limited.
    #[error(transparent)]
    RetriesExhausted(#[from] RetriesExhaustedError),

    /// A 2xx response whose body is not JSON.
    #[error("Malformed response body (status {code}): {message}")]
    MalformedBody {
        /// The HTTP status code of the response.
        code: u16,
        /// The JSON parser's error message.
        message: String,
    },

    /// DNS, TLS, connection or client construction failure. Never retried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"errors":"Not Found"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"errors":"Not Found"}"#);
    }

    #[test]
    fn test_retries_exhausted_error_includes_try_count() {
        let error = RetriesExhaustedError {
            code: 429,
            tries: 5,
            message: r#"{"errors":"Throttled"}"#.to_string(),
            error_reference: Some("req-1".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains("all 5 attempts"));
        assert!(message.contains("Throttled"));
    }

    #[test]
    fn test_malformed_body_display() {
        let error = HttpError::MalformedBody {
            code: 200,
            message: "expected value at line 1 column 1".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("status 200"));
        assert!(message.contains("expected value"));
    }

    #[test]
    fn test_http_error_from_conversions() {
        let error: HttpError = RetriesExhaustedError {
            code: 429,
            tries: 5,
            message: String::new(),
            error_reference: None,
        }
        .into();
        assert!(matches!(error, HttpError::RetriesExhausted(e) if e.tries == 5));

        let error: HttpError = HttpResponseError {
            code: 401,
            message: "unauthorized".to_string(),
            error_reference: None,
        }
        .into();
        assert!(matches!(error, HttpError::Response(e) if e.code == 401));
    }
}

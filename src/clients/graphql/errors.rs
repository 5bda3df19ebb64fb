//! GraphQL-specific error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for Admin GraphQL operations.
///
/// Errors that come back next to usable `data` are logged rather than
/// raised; only responses with nothing to hand back become an error.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred (network, non-2xx, retries exhausted).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The query was rejected and the response carries no `data`.
    #[error("GraphQL query failed: {}", .messages.join("; "))]
    Query {
        /// The `message` of each entry in the response's `errors`.
        messages: Vec<String>,
    },

    /// The response has neither `data` nor `errors`.
    #[error("GraphQL response contained no data")]
    MissingData,
}

impl GraphqlError {
    /// Returns `true` if the request gave up after persistent rate limiting.
    #[must_use]
    pub const fn is_retries_exhausted(&self) -> bool {
        matches!(self, Self::Http(HttpError::RetriesExhausted(_)))
    }
}

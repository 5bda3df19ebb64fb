//! Transport layer for the Shopify Admin API.
//!
//! - [`HttpClient`]: authenticated JSON POSTs with rate-limit retries
//! - [`HttpResponse`]: a parsed response
//! - [`HttpError`]: transport errors
//! - [`graphql::GraphqlClient`]: the throttled GraphQL client built on top
//!
//! # Retry Behavior
//!
//! Only rate limiting is retried (see [`retry`]). Network failures and other
//! non-2xx statuses are returned to the caller on the first occurrence.

mod errors;
pub mod graphql;
mod http_client;
mod http_response;
pub mod retry;

pub use errors::{HttpError, HttpResponseError, RetriesExhaustedError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError, ThrottleStatus};

//! Throttled GraphQL client for the Shopify Admin API.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: executes one query, absorbing rate limiting and
//!   cost-based throttling, and returns the `data` payload
//! - [`GraphqlError`]: error type for GraphQL operations
//! - [`ThrottleStatus`]: the cost bucket state reported by each response
//!
//! # Backpressure
//!
//! Two mechanisms keep a run inside the shop's query budget:
//!
//! - **Reactive**: HTTP 429 and `THROTTLED` errors are retried after
//!   1s, 2s, 4s and 8s, for five attempts in total, then fail with
//!   [`HttpError::RetriesExhausted`](crate::clients::HttpError::RetriesExhausted).
//! - **Proactive**: when a response reports fewer than
//!   [`THROTTLE_RESERVE`] points available, the call sleeps
//!   `ceil((reserve - available) / restoreRate)` seconds before returning,
//!   capped at [`MAX_THROTTLE_WAIT`].
//!
//! # Response Structure
//!
//! ```json
//! {
//!   "data": { ... },
//!   "errors": [ ... ],
//!   "extensions": { "cost": { "throttleStatus": {
//!     "maximumAvailable": 2000.0, "currentlyAvailable": 1990, "restoreRate": 100.0
//!   } } }
//! }
//! ```

mod client;
mod errors;
mod throttle;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
pub use throttle::{ThrottleStatus, MAX_THROTTLE_WAIT, THROTTLE_RESERVE};

//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid shop domain, API version or credential is rejected before any
//! request is sent.
//!
//! # Example
//!
//! ```rust
//! use shopify_b2b_pricing::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`PricingConfig`](crate::PricingConfig)
/// or one of its validated values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Catalog identifier is invalid.
    #[error("Invalid catalog id '{id}'. Expected 'gid://shopify/Catalog/<id>' or a bare numeric id.")]
    InvalidCatalogId {
        /// The identifier that was provided.
        id: String,
    },

    /// Product or variant identifier has no usable trailing segment.
    #[error("Invalid {field} '{id}'. Expected a bare id or a GraphQL id such as 'gid://shopify/Product/<id>'.")]
    InvalidProductId {
        /// The record field the identifier came from (`id` or `objectID`).
        field: &'static str,
        /// The identifier that was provided.
        id: String,
    },
}

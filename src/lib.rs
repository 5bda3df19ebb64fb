//! # Shopify B2B Pricing
//!
//! Enriches product records with per-catalog B2B prices from the Shopify
//! Admin GraphQL API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`PricingConfig`] and [`PricingConfigBuilder`]
//! - Validated newtypes for credentials, shop domains, and catalog IDs
//! - An async GraphQL client with 429 backoff and cost-based throttling
//! - Catalog and price resolution for a product variant
//! - A record-level [`Enricher`] that attaches a `b2b_pricing` map
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_b2b_pricing::{ApiVersion, PricingConfig, ShopDomain};
//!
//! let config = PricingConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```
//!
//! ## Enriching Records
//!
//! ```rust,ignore
//! use shopify_b2b_pricing::{Enricher, PricingConfig, ShopDomain};
//! use shopify_b2b_pricing::enrich::{EnvSecretSource, Record};
//! use serde_json::json;
//!
//! let enricher = Enricher::new(
//!     PricingConfig::builder().shop(ShopDomain::new("my-store")?).build()?,
//! );
//!
//! let record = Record::from_value(json!({ "id": "111", "objectID": "222" }))?;
//! for record in enricher.transform(record, &EnvSecretSource).await?.into_records() {
//!     println!("{}", serde_json::to_string(&record)?);
//! }
//! ```
//!
//! ## Rate Limiting
//!
//! Every query goes through [`GraphqlClient`], which:
//! - retries HTTP 429 and `THROTTLED` responses after 1s, 2s, 4s, 8s
//! - gives up after 5 attempts with [`RetriesExhaustedError`]
//! - sleeps after a successful query until the cost bucket holds at least
//!   10 points again
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and credentials are passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod enrich;
pub mod error;
pub mod pricing;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, EnrichMode, HostUrl, PricingConfig, PricingConfigBuilder,
    ShopDomain,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    GraphqlClient, GraphqlError, HttpClient, HttpError, HttpResponse, HttpResponseError,
    RetriesExhaustedError, ThrottleStatus,
};

// Re-export pricing and enrichment types
pub use enrich::{EnrichError, Enricher, Record, TransformOutput};
pub use pricing::{CatalogRef, PriceEntry, PricingResult, ProductRef, ResolutionError};

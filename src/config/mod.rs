//! Configuration for the pricing enrichment pipeline.
//!
//! # Overview
//!
//! - [`PricingConfig`]: immutable settings shared by every record
//! - [`PricingConfigBuilder`]: builder for [`PricingConfig`]
//! - [`EnrichMode`]: whether every published catalog is priced or only one
//! - [`AccessToken`], [`ShopDomain`], [`HostUrl`]: validated newtypes
//! - [`ApiVersion`]: Admin API version embedded in the endpoint path
//!
//! Retry ceiling, backoff unit, throttle reserve and page sizes are fixed
//! constants and intentionally absent from the builder.
//!
//! # Example
//!
//! ```rust
//! use shopify_b2b_pricing::{ApiVersion, PricingConfig, ShopDomain};
//!
//! let config = PricingConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .api_version(ApiVersion::V2025_07)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;
use crate::pricing::CatalogRef;

/// Which catalogs an enrichment run prices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnrichMode {
    /// Price every catalog the product is published to.
    #[default]
    AllCatalogs,
    /// Price only this catalog, and only if the product is published to it.
    SingleCatalog(CatalogRef),
}

/// Settings for talking to one shop's Admin GraphQL API.
///
/// `PricingConfig` holds no credential: the access token is passed per record
/// so the same configuration can serve any token the host hands over.
#[derive(Clone, Debug)]
pub struct PricingConfig {
    shop: ShopDomain,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    mode: EnrichMode,
}

impl PricingConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> PricingConfigBuilder {
        PricingConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the Admin API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the API host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the enrichment mode.
    #[must_use]
    pub const fn mode(&self) -> &EnrichMode {
        &self.mode
    }
}

// Verify PricingConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PricingConfig>();
};

/// Builder for [`PricingConfig`].
///
/// `shop` is required. Defaults:
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `api_host`: `None` (requests go to `https://<shop>`)
/// - `user_agent_prefix`: `None`
/// - `mode`: [`EnrichMode::AllCatalogs`]
#[derive(Debug, Default)]
pub struct PricingConfigBuilder {
    shop: Option<ShopDomain>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    mode: Option<EnrichMode>,
}

impl PricingConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes requests through another origin.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the enrichment mode.
    #[must_use]
    pub fn mode(mut self, mode: EnrichMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Builds the [`PricingConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` is not set.
    pub fn build(self) -> Result<PricingConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;

        Ok(PricingConfig {
            shop,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            mode: self.mode.unwrap_or_default(),
        })
    }
}

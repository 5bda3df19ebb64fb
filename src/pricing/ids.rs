//! Typed identifiers for products, variants and catalogs.
//!
//! Shopify GraphQL identifiers are URIs such as `gid://shopify/Catalog/10`;
//! the rest of the pipeline keys on the bare trailing ID (`10`). The two are
//! interconvertible, and converting here once keeps string slicing out of
//! the resolvers.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Returns everything after the last `/` of a GraphQL ID.
///
/// Idempotent: a bare ID has no `/` and is returned unchanged.
///
/// ```rust
/// use shopify_b2b_pricing::pricing::normalize_id;
///
/// assert_eq!(normalize_id("gid://shopify/Catalog/10"), "10");
/// assert_eq!(normalize_id("10"), "10");
/// assert_eq!(normalize_id(normalize_id("gid://shopify/Catalog/10")), "10");
/// ```
#[must_use]
pub fn normalize_id(raw: &str) -> &str {
    let raw = raw.trim();
    raw.rfind('/').map_or(raw, |i| &raw[i + 1..])
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// A B2B catalog, stored as its bare numeric ID.
///
/// Ordering and equality are on the bare ID, so `gid://shopify/Catalog/10` and
/// `10` denote the same catalog.
///
/// ```rust
/// use shopify_b2b_pricing::pricing::CatalogRef;
///
/// let catalog: CatalogRef = "gid://shopify/Catalog/10".parse().unwrap();
/// assert_eq!(catalog.id(), "10");
/// assert_eq!(catalog.gid(), "gid://shopify/Catalog/10");
/// assert_eq!(catalog, "10".parse::<CatalogRef>().unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogRef(String);

impl CatalogRef {
    /// URI prefix of catalog GraphQL IDs.
    pub const GID_PREFIX: &'static str = "gid://shopify/Catalog/";

    /// Parses either form of a catalog ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCatalogId`] if the trailing segment is
    /// empty or not numeric.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let id = normalize_id(raw);
        if !is_numeric_id(id) {
            return Err(ConfigError::InvalidCatalogId {
                id: raw.to_string(),
            });
        }
        Ok(Self(id.to_string()))
    }

    /// Returns the bare ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Returns the GraphQL ID, `gid://shopify/Catalog/<id>`.
    #[must_use]
    pub fn gid(&self) -> String {
        format!("{}{}", Self::GID_PREFIX, self.0)
    }
}

impl FromStr for CatalogRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CatalogRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CatalogRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CatalogRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

/// The product and sellable variant a record describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRef {
    product_id: String,
    variant_id: String,
}

impl ProductRef {
    /// Product GraphQL ID prefix.
    pub const PRODUCT_GID_PREFIX: &'static str = "gid://shopify/Product/";

    /// Creates a product reference; either ID may be bare or a GraphQL ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProductId`] naming the offending field
    /// (`id` or `objectID`) if its trailing segment is empty.
    pub fn new(product_id: &str, variant_id: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            product_id: Self::bare(product_id, "id")?.to_string(),
            variant_id: Self::bare(variant_id, "objectID")?.to_string(),
        })
    }

    fn bare<'a>(raw: &'a str, field: &'static str) -> Result<&'a str, ConfigError> {
        let id = normalize_id(raw);
        if id.is_empty() {
            return Err(ConfigError::InvalidProductId {
                field,
                id: raw.to_string(),
            });
        }
        Ok(id)
    }

    /// Returns the bare product ID.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Returns the bare variant ID.
    #[must_use]
    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    /// Returns `gid://shopify/Product/<id>`.
    #[must_use]
    pub fn product_gid(&self) -> String {
        format!("{}{}", Self::PRODUCT_GID_PREFIX, self.product_id)
    }
}

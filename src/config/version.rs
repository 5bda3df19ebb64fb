//! Shopify Admin API version.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopify Admin API version.
///
/// Shopify releases a stable version every quarter (January, April, July,
/// October) and keeps each one for roughly twelve months. The GraphQL endpoint
/// path embeds the version: `/admin/api/2025-10/graphql.json`.
///
/// # Example
///
/// ```rust
/// use shopify_b2b_pricing::ApiVersion;
///
/// let version: ApiVersion = "2025-07".parse().unwrap();
/// assert_eq!(version.to_string(), "2025-07");
/// assert!(version < ApiVersion::Unstable);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A quarterly release, e.g. `2025-10`.
    Release {
        /// Release year.
        year: u16,
        /// Release month: 1, 4, 7 or 10.
        month: u8,
    },
    /// The `unstable` version. Sorts after every release.
    Unstable,
}

impl ApiVersion {
    /// 2025-01
    pub const V2025_01: Self = Self::Release { year: 2025, month: 1 };
    /// 2025-04
    pub const V2025_04: Self = Self::Release { year: 2025, month: 4 };
    /// 2025-07
    pub const V2025_07: Self = Self::Release { year: 2025, month: 7 };
    /// 2025-10
    pub const V2025_10: Self = Self::Release { year: 2025, month: 10 };

    /// Returns the latest stable version known to this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns the oldest version still inside Shopify's support window.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_01
    }

    /// Returns `true` for quarterly releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Release { .. })
    }

    /// Returns `true` if this release is older than [`Self::minimum_supported`].
    ///
    /// Deprecated versions keep answering for a while, so this only drives a
    /// warning when a client is built.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        *self < Self::minimum_supported()
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion { version: s.clone() };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        // Quarterly releases only
        if !matches!(month, 1 | 4 | 7 | 10) {
            return Err(invalid());
        }

        Ok(Self::Release { year, month })
    }
}

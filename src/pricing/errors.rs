//! Resolution error types.

use crate::clients::GraphqlError;
use thiserror::Error;

/// Errors raised while resolving catalogs or prices.
///
/// "No price" is not an error: inactive catalogs, missing price lists and
/// empty price nodes resolve to `None`. These variants cover responses the
/// resolvers cannot interpret at all.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The underlying GraphQL call failed.
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// `product` came back null.
    #[error("Product '{product_id}' not found")]
    ProductNotFound {
        /// Bare product ID that was queried.
        product_id: String,
    },

    /// `catalog` came back null.
    #[error("Catalog '{catalog_id}' not found")]
    CatalogNotFound {
        /// Bare catalog ID that was queried.
        catalog_id: String,
    },

    /// A field the query selects is absent from the response.
    #[error("Response is missing field '{path}'")]
    MissingField {
        /// Dotted path of the missing field.
        path: &'static str,
    },

    /// The response does not have the shape the query asks for.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Deserializer error message.
        message: String,
    },

    /// A catalog ID in the response is not a catalog GraphQL ID.
    #[error("Response contains invalid catalog id '{id}'")]
    InvalidCatalogId {
        /// The ID as returned.
        id: String,
    },

    /// A price amount is not a non-negative decimal.
    #[error("Invalid price amount '{amount}' in catalog '{catalog_id}'")]
    InvalidAmount {
        /// Bare catalog ID.
        catalog_id: String,
        /// The amount as returned.
        amount: String,
    },
}

impl ResolutionError {
    /// Returns `true` if the request gave up after persistent rate limiting.
    #[must_use]
    pub const fn is_retries_exhausted(&self) -> bool {
        match self {
            Self::Graphql(e) => e.is_retries_exhausted(),
            _ => false,
        }
    }
}

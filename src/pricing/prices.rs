//! Price resolution: the price of one variant in one catalog.

use serde::{Deserialize, Serialize};

use crate::clients::GraphqlClient;
use crate::pricing::{CatalogRef, ResolutionError};

/// Price nodes fetched per catalog. A variant has at most one price in a
/// catalog's price list.
pub const PRICES_PAGE_SIZE: u32 = 1;

const CATALOG_PRICE_QUERY: &str = r"
query CatalogPrice($id: ID!, $first: Int!, $query: String!) {
  catalog(id: $id) {
    id
    title
    status
    priceList {
      id
      name
      currency
      prices(first: $first, query: $query) {
        nodes {
          variant {
            id
          }
          price {
            amount
            currencyCode
          }
        }
      }
    }
  }
}
";

/// A resolved price point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// The catalog the price belongs to.
    pub catalog_id: CatalogRef,
    /// Non-negative amount.
    pub amount: f64,
    /// ISO 4217 currency code, when reported.
    pub currency_code: Option<String>,
}

/// Catalog publishing status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogStatus {
    /// Prices apply to buyers.
    Active,
    /// Not yet published.
    Draft,
    /// Retired.
    Archived,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct CatalogPriceData {
    catalog: Option<CatalogNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogNode {
    status: CatalogStatus,
    price_list: Option<PriceListNode>,
}

#[derive(Debug, Deserialize)]
struct PriceListNode {
    prices: Option<PriceConnection>,
}

#[derive(Debug, Deserialize)]
struct PriceConnection {
    #[serde(default)]
    nodes: Vec<PriceNode>,
}

#[derive(Debug, Deserialize)]
struct PriceNode {
    price: Option<MoneyV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyV2 {
    #[serde(default)]
    amount: serde_json::Value,
    currency_code: Option<String>,
}

/// Resolves a variant's price within a catalog.
#[derive(Debug, Clone, Copy)]
pub struct PriceResolver<'a> {
    client: &'a GraphqlClient,
}

impl<'a> PriceResolver<'a> {
    /// Creates a resolver issuing queries through `client`.
    #[must_use]
    pub const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// Returns the price of `variant_id` in `catalog`.
    ///
    /// `None` when the catalog is not `ACTIVE` (whatever prices it lists),
    /// has no price list, or lists no price for the variant. A price node
    /// whose `price` or `amount` is null or absent counts as no price.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::Graphql`] if the query fails
    /// - [`ResolutionError::CatalogNotFound`] if `catalog` is null
    /// - [`ResolutionError::InvalidAmount`] if the amount is not a
    ///   non-negative decimal
    pub async fn resolve_price(
        &self,
        variant_id: &str,
        catalog: &CatalogRef,
    ) -> Result<Option<PriceEntry>, ResolutionError> {
        let variables = serde_json::json!({
            "id": catalog.gid(),
            "first": PRICES_PAGE_SIZE,
            "query": format!("variant_id:{variant_id}"),
        });
        let data = self
            .client
            .execute(CATALOG_PRICE_QUERY, Some(variables))
            .await?;

        let entry = Self::parse(catalog, data)?;
        tracing::debug!(
            catalog_id = catalog.id(),
            variant_id,
            amount = ?entry.as_ref().map(|e| e.amount),
            "Resolved catalog price"
        );
        Ok(entry)
    }

    fn parse(
        catalog: &CatalogRef,
        data: serde_json::Value,
    ) -> Result<Option<PriceEntry>, ResolutionError> {
        let data: CatalogPriceData =
            serde_json::from_value(data).map_err(|e| ResolutionError::MalformedResponse {
                message: e.to_string(),
            })?;

        let node = data.catalog.ok_or_else(|| ResolutionError::CatalogNotFound {
            catalog_id: catalog.id().to_string(),
        })?;

        if node.status != CatalogStatus::Active {
            return Ok(None);
        }

        let Some(money) = node
            .price_list
            .and_then(|list| list.prices)
            .and_then(|prices| prices.nodes.into_iter().next())
            .and_then(|node| node.price)
            .filter(|money| !money.amount.is_null())
        else {
            return Ok(None);
        };

        let amount = parse_amount(&money.amount).ok_or_else(|| ResolutionError::InvalidAmount {
            catalog_id: catalog.id().to_string(),
            amount: money.amount.to_string(),
        })?;

        Ok(Some(PriceEntry {
            catalog_id: catalog.clone(),
            amount,
            currency_code: money.currency_code,
        }))
    }
}

/// Parses a GraphQL `Decimal`, serialized as a string ("19.99") or, by some
/// proxies, as a number.
fn parse_amount(value: &serde_json::Value) -> Option<f64> {
    let amount = match value {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        serde_json::Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

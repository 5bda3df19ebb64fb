//! The per-product pricing attachment.

use std::collections::BTreeMap;

use crate::pricing::{CatalogRef, PriceEntry};

/// Prices for one product, keyed by catalog.
///
/// Every catalog that was priced has a key; `None` means the catalog was
/// inactive or lists no price for the variant. Keys never include a catalog
/// the product is not published to, because entries are only recorded by the
/// orchestrator while walking the product's publications.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingResult {
    entries: BTreeMap<CatalogRef, Option<PriceEntry>>,
}

impl PricingResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records the outcome for `catalog`.
    pub fn record(&mut self, catalog: CatalogRef, entry: Option<PriceEntry>) {
        self.entries.insert(catalog, entry);
    }

    /// Returns the entry for `catalog`: `None` if it was never priced,
    /// `Some(None)` if it was priced and had no active price.
    #[must_use]
    pub fn get(&self, catalog: &CatalogRef) -> Option<Option<&PriceEntry>> {
        self.entries.get(catalog).map(Option::as_ref)
    }

    /// Number of catalogs priced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no catalog was priced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates catalogs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&CatalogRef, Option<&PriceEntry>)> {
        self.entries.iter().map(|(catalog, entry)| (catalog, entry.as_ref()))
    }

    /// Renders the `b2b_pricing` value: `{ "<catalog id>": amount | null }`.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(catalog, entry)| {
                let amount = entry
                    .as_ref()
                    .map_or(serde_json::Value::Null, |e| serde_json::json!(e.amount));
                (catalog.id().to_string(), amount)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

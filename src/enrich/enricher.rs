//! The per-record enrichment orchestrator.

use crate::clients::GraphqlClient;
use crate::config::{AccessToken, EnrichMode, PricingConfig};
use crate::enrich::secrets::{access_token, SecretSource, SECRET_NAME};
use crate::enrich::{EnrichError, Record, TransformOutput};
use crate::pricing::{
    CatalogRef, CatalogResolver, PriceResolver, PricingResult, ProductRef, ResolutionError,
};

/// Attaches B2B pricing to records.
///
/// For each record the enricher:
///
/// 1. reads `id` / `objectID`
/// 2. resolves the product's catalogs
/// 3. prices the variant in each catalog, one query at a time
/// 4. writes the result to `b2b_pricing`
///
/// Queries for one record run strictly in sequence so they share the shop's
/// rate-limit budget politely. The record is only modified after the last
/// query succeeds; dropping the future midway leaves nothing half-written.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_b2b_pricing::{AccessToken, Enricher, PricingConfig, ShopDomain};
/// use shopify_b2b_pricing::enrich::Record;
/// use serde_json::json;
///
/// let enricher = Enricher::new(
///     PricingConfig::builder().shop(ShopDomain::new("my-store")?).build()?,
/// );
/// let token = AccessToken::new("shpat_...")?;
///
/// let record = Record::from_value(json!({ "id": "111", "objectID": "222" }))?;
/// let record = enricher.enrich(record, &token).await?;
/// // record["b2b_pricing"] == { "10": 19.99, "20": null }
/// ```
#[derive(Clone, Debug)]
pub struct Enricher {
    config: PricingConfig,
}

impl Enricher {
    /// Creates an enricher.
    #[must_use]
    pub const fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Host pipeline entry point: looks up the `SHOPIFY` secret, then
    /// [`enrich`](Self::enrich)es the record.
    ///
    /// # Errors
    ///
    /// Secret lookup errors, plus everything [`enrich`](Self::enrich) returns.
    pub async fn transform<S>(
        &self,
        record: Record,
        secrets: &S,
    ) -> Result<TransformOutput, EnrichError>
    where
        S: SecretSource + ?Sized,
    {
        let token = access_token(secrets, SECRET_NAME)?;
        self.enrich(record, &token).await.map(TransformOutput::One)
    }

    /// Returns `record` with `b2b_pricing` attached.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::MissingField`] if `id` or `objectID` is unusable
    /// - [`EnrichError::Resolution`] if a query fails, including exhausted
    ///   rate-limit retries
    pub async fn enrich(&self, record: Record, token: &AccessToken) -> Result<Record, EnrichError> {
        let product = record.product_ref()?;
        let pricing = self.price_product(&product, token).await?;

        tracing::info!(
            product_id = product.product_id(),
            variant_id = product.variant_id(),
            catalogs = pricing.len(),
            "Attached B2B pricing"
        );
        Ok(record.with_pricing(&pricing))
    }

    /// Resolves and prices the catalogs of one product.
    ///
    /// # Errors
    ///
    /// [`EnrichError::Resolution`] on any failed query.
    pub async fn price_product(
        &self,
        product: &ProductRef,
        token: &AccessToken,
    ) -> Result<PricingResult, EnrichError> {
        let client = GraphqlClient::new(&self.config, token).map_err(ResolutionError::from)?;

        let publications = CatalogResolver::new(&client)
            .resolve_catalogs(product)
            .await?;

        let targets: Vec<&CatalogRef> = match self.config.mode() {
            EnrichMode::AllCatalogs => publications.iter().collect(),
            EnrichMode::SingleCatalog(target) if publications.contains(target) => vec![target],
            EnrichMode::SingleCatalog(target) => {
                tracing::info!(
                    product_id = product.product_id(),
                    catalog_id = target.id(),
                    "Product is not published in the catalog"
                );
                Vec::new()
            }
        };

        let prices = PriceResolver::new(&client);
        let mut pricing = PricingResult::new();
        for catalog in targets {
            let entry = prices.resolve_price(product.variant_id(), catalog).await?;
            pricing.record(catalog.clone(), entry);
        }

        Ok(pricing)
    }
}

//! B2B catalog and price resolution.
//!
//! Pricing a product is a two-step workflow over the
//! [`GraphqlClient`](crate::clients::GraphqlClient):
//!
//! 1. [`CatalogResolver`] lists the company-location catalogs the product is
//!    published to (a [`PublicationSet`])
//! 2. [`PriceResolver`] fetches the variant's price in one catalog, yielding
//!    a [`PriceEntry`] only when the catalog is `ACTIVE`
//!
//! The orchestrator in [`crate::enrich`] runs step 2 once per catalog and
//! collects the outcomes in a [`PricingResult`].
//!
//! # Limits
//!
//! Page sizes are fixed ([`PUBLICATIONS_PAGE_SIZE`], [`PRICES_PAGE_SIZE`]).
//! A product published to more catalogs than the page size is priced for the
//! first page only.

mod catalogs;
mod errors;
mod ids;
mod prices;
mod result;

pub use catalogs::{CatalogResolver, PublicationSet, PUBLICATIONS_PAGE_SIZE};
pub use errors::ResolutionError;
pub use ids::{normalize_id, CatalogRef, ProductRef};
pub use prices::{CatalogStatus, PriceEntry, PriceResolver, PRICES_PAGE_SIZE};
pub use result::PricingResult;

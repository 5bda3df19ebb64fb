//! Record enrichment for the host pipeline.
//!
//! - [`Enricher`]: composes catalog and price resolution per record
//! - [`Record`]: a pipeline record (`id`, `objectID` in; `b2b_pricing` out)
//! - [`TransformOutput`]: one record, several, or none
//! - [`SecretSource`]: where the access token comes from
//!
//! # Pricing Shape
//!
//! ```json
//! { "id": "111", "objectID": "222", "b2b_pricing": { "10": 19.99, "20": null } }
//! ```
//!
//! Every catalog the product is published to gets a key. `null` marks a
//! catalog that is not `ACTIVE` or lists no price for the variant. A product
//! published nowhere gets `{}`.

mod enricher;
mod errors;
mod record;
mod secrets;

pub use enricher::Enricher;
pub use errors::EnrichError;
pub use record::{Record, TransformOutput, PRICING_FIELD, PRODUCT_ID_FIELD, VARIANT_ID_FIELD};
pub use secrets::{access_token, EnvSecretSource, SecretSource, StaticSecrets, SECRET_NAME};

//! Pipeline records.

use serde::{Deserialize, Serialize};

use crate::enrich::EnrichError;
use crate::pricing::{PricingResult, ProductRef};

/// Field holding the product ID.
pub const PRODUCT_ID_FIELD: &str = "id";
/// Field holding the variant ID.
pub const VARIANT_ID_FIELD: &str = "objectID";
/// Field the pricing is attached to.
pub const PRICING_FIELD: &str = "b2b_pricing";

/// One record of the host pipeline: an arbitrary JSON object.
///
/// Only `id`, `objectID` and `b2b_pricing` have meaning here; every other
/// field passes through untouched.
///
/// ```rust
/// use shopify_b2b_pricing::enrich::Record;
/// use serde_json::json;
///
/// let record = Record::from_value(json!({ "id": 111, "objectID": "222", "title": "Widget" })).unwrap();
/// let product = record.product_ref().unwrap();
/// assert_eq!(product.product_id(), "111");
/// assert_eq!(product.variant_id(), "222");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(serde_json::Map<String, serde_json::Value>);

impl Record {
    /// Wraps an existing JSON object.
    #[must_use]
    pub const fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(fields)
    }

    /// Converts a JSON value into a record.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::NotAnObject`] for anything but an object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EnrichError> {
        match value {
            serde_json::Value::Object(fields) => Ok(Self(fields)),
            _ => Err(EnrichError::NotAnObject),
        }
    }

    /// Returns a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    /// Reads the product and variant IDs.
    ///
    /// Both may be JSON strings (bare or GraphQL IDs) or non-negative
    /// integers.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::MissingField`] naming the first absent, empty or
    ///   non-id field
    /// - [`EnrichError::InvalidRecordId`] for a GraphQL ID with an empty
    ///   trailing segment
    pub fn product_ref(&self) -> Result<ProductRef, EnrichError> {
        let product_id = self.id_field(PRODUCT_ID_FIELD)?;
        let variant_id = self.id_field(VARIANT_ID_FIELD)?;
        ProductRef::new(&product_id, &variant_id).map_err(EnrichError::InvalidRecordId)
    }

    fn id_field(&self, field: &'static str) -> Result<String, EnrichError> {
        match self.0.get(field) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(serde_json::Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
            _ => Err(EnrichError::MissingField { field }),
        }
    }

    /// Returns the record with `b2b_pricing` set to `pricing`.
    #[must_use]
    pub fn with_pricing(mut self, pricing: &PricingResult) -> Self {
        self.0.insert(PRICING_FIELD.to_string(), pricing.to_value());
        self
    }

    /// Unwraps into a JSON value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.0)
    }
}

/// What a transform hands back to the host pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformOutput {
    /// Emit one record.
    One(Record),
    /// Emit several records, in order.
    Many(Vec<Record>),
    /// Drop the input record.
    Omit,
}

impl TransformOutput {
    /// Flattens into the records to emit.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
            Self::Omit => Vec::new(),
        }
    }
}

//! Enrichment error types.

use crate::error::ConfigError;
use crate::pricing::ResolutionError;
use thiserror::Error;

/// Errors that fail the enrichment of one record.
///
/// Whether a failed record is skipped or aborts the batch is the host's
/// decision; nothing here retries.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The input is not a JSON object.
    #[error("Record is not a JSON object")]
    NotAnObject,

    /// A required record field is absent, empty, or not a string/integer.
    #[error("Record field '{field}' is missing or not a usable id")]
    MissingField {
        /// The field name (`id` or `objectID`).
        field: &'static str,
    },

    /// A record ID field is present but has no usable trailing segment.
    #[error("Record has an unusable id: {0}")]
    InvalidRecordId(ConfigError),

    /// The secret store has no entry under the credential name.
    #[error("Secret '{name}' not found")]
    MissingSecret {
        /// Name that was looked up.
        name: String,
    },

    /// The secret exists but is not a usable access token.
    #[error("Secret is not a valid access token: {0}")]
    InvalidSecret(#[from] ConfigError),

    /// Catalog or price resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl EnrichError {
    /// Returns `true` if the record failed because rate limiting outlasted
    /// every retry.
    #[must_use]
    pub const fn is_retries_exhausted(&self) -> bool {
        match self {
            Self::Resolution(e) => e.is_retries_exhausted(),
            _ => false,
        }
    }
}

//! Credential lookup.
//!
//! The host pipeline owns the secret store. The enricher only asks it for
//! one name and turns the answer into an [`AccessToken`].

use std::collections::HashMap;

use crate::config::AccessToken;
use crate::enrich::EnrichError;

/// Name the access token is stored under.
pub const SECRET_NAME: &str = "SHOPIFY";

/// A read-only secret store.
pub trait SecretSource {
    /// Returns the secret stored under `name`.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads secrets from process environment variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSecretSource;

impl SecretSource for EnvSecretSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// An in-memory secret store, for embedding and tests.
///
/// ```rust
/// use shopify_b2b_pricing::enrich::{SecretSource, StaticSecrets};
///
/// let secrets = StaticSecrets::new().with("SHOPIFY", "shpat_123");
/// assert_eq!(secrets.get("SHOPIFY").as_deref(), Some("shpat_123"));
/// ```
#[derive(Clone, Default)]
pub struct StaticSecrets(HashMap<String, String>);

impl StaticSecrets {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

impl std::fmt::Debug for StaticSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Looks up `name` and validates it as an access token.
///
/// # Errors
///
/// - [`EnrichError::MissingSecret`] if the store has no such entry
/// - [`EnrichError::InvalidSecret`] if the value is blank
pub fn access_token<S>(source: &S, name: &str) -> Result<AccessToken, EnrichError>
where
    S: SecretSource + ?Sized,
{
    let secret = source.get(name).ok_or_else(|| EnrichError::MissingSecret {
        name: name.to_string(),
    })?;
    Ok(AccessToken::new(secret)?)
}

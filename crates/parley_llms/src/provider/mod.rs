//! Provider trait and registry

mod trait_def;

pub use trait_def::Provider;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Providers available to a session, keyed by [`Provider::provider_id`].
///
/// Registering a second provider with the same ID replaces the first.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `provider` under its own ID.
    pub fn register<P: Provider + 'static>(self, provider: P) -> Self {
        self.register_shared(Arc::new(provider))
    }

    /// Add an already shared provider under its own ID.
    pub fn register_shared(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers
            .insert(provider.provider_id().to_string(), provider);
        self
    }

    pub fn get_provider(&self, id: &str) -> Result<Arc<dyn Provider>> {
        self.providers.get(id).cloned().ok_or_else(|| {
            if self.providers.is_empty() {
                Error::ProviderNotFound(format!("{} (no providers configured)", id))
            } else {
                Error::ProviderNotFound(format!(
                    "{} (available: {})",
                    id,
                    self.list_providers().join(", ")
                ))
            }
        })
    }

    /// Registered IDs in sorted order.
    pub fn list_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

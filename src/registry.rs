//! Provider registry mapping provider names to backend constructors

use crate::config::EmbedderConfig;
use crate::embedding::{ollama, Embedder, OllamaEmbedder};
use crate::error::{EmbedderError, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::info;

/// Future returned by a provider constructor
pub type ProviderFuture = BoxFuture<'static, Result<Arc<dyn Embedder>>>;

/// Type-erased provider constructor
pub type ProviderFn = Arc<dyn Fn(EmbedderConfig) -> ProviderFuture + Send + Sync>;

static GLOBAL: OnceLock<Arc<ProviderRegistry>> = OnceLock::new();

/// Process-wide registry.
///
/// Created with the built-in providers on first use and kept for the
/// lifetime of the process. Registrations are never removed, so a name
/// registered here stays taken; tests that need isolation should build
/// their own [`ProviderRegistry`].
pub fn global() -> Arc<ProviderRegistry> {
    GLOBAL
        .get_or_init(|| Arc::new(ProviderRegistry::with_defaults()))
        .clone()
}

/// Concurrency-safe map from provider name to constructor
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, ProviderFn>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in `ollama` provider
    pub fn with_defaults() -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            ollama::PROVIDER_NAME.to_string(),
            erase(OllamaEmbedder::construct),
        );
        Self {
            providers: RwLock::new(providers),
        }
    }

    /// Register a constructor under `name`.
    ///
    /// Fails with [`EmbedderError::DuplicateProvider`] if the name is taken;
    /// the constructor registered first stays in place.
    pub fn register_provider<F, Fut>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(EmbedderConfig) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn Embedder>>> + Send + 'static,
    {
        let name = name.into();
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if providers.contains_key(&name) {
            return Err(EmbedderError::DuplicateProvider(name));
        }

        info!(provider = %name, "Registered embedding provider");
        providers.insert(name, erase(constructor));
        Ok(())
    }

    /// Construct `name` with the default configuration
    pub async fn create(&self, name: &str) -> Result<Arc<dyn Embedder>> {
        let constructor = self.lookup(name)?;
        let config = EmbedderConfig::for_provider(name);

        info!(provider = %name, "Creating embedder");
        constructor(config).await
    }

    /// Construct the provider named by `config.provider`, passing `config` through as is
    pub async fn create_with_config(&self, config: EmbedderConfig) -> Result<Arc<dyn Embedder>> {
        let constructor = self.lookup(&config.provider)?;

        info!(provider = %config.provider, model = %config.model, "Creating embedder");
        constructor(config).await
    }

    /// Names of all registered providers, in no particular order
    pub fn list_providers(&self) -> Vec<String> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    // The read lock is released before the constructor runs; constructors
    // may perform network round-trips.
    fn lookup(&self, name: &str) -> Result<ProviderFn> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| EmbedderError::UnknownProvider(name.to_string()))
    }
}

fn erase<F, Fut>(constructor: F) -> ProviderFn
where
    F: Fn(EmbedderConfig) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn Embedder>>> + Send + 'static,
{
    Arc::new(move |config| constructor(config).boxed())
}

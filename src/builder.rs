//! Fluent builder that accumulates configuration before constructing a backend

use crate::config::{self, EmbedderConfig, OptionValue};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::registry::{self, ProviderRegistry};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builder for an embedding backend.
///
/// Setters can be chained; [`load_config`](Self::load_config) replaces the
/// whole configuration with the file's contents. Nothing is constructed
/// until [`build`](Self::build), which may be called more than once.
///
/// ```rust,no_run
/// # async fn demo() -> embedder::Result<()> {
/// let embedder = embedder::builder("ollama")
///     .with_base_url("http://localhost:11434")
///     .with_model("nomic-embed-text")
///     .build()
///     .await?;
/// println!("dimension {}", embedder.dimension());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EmbedderBuilder {
    config: EmbedderConfig,
    registry: Arc<ProviderRegistry>,
}

impl EmbedderBuilder {
    /// Start from the default configuration for `provider`, using the process-wide registry
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            config: EmbedderConfig::for_provider(provider),
            registry: registry::global(),
        }
    }

    /// Construct through `registry` instead of the process-wide one
    pub fn with_registry(mut self, registry: Arc<ProviderRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.config.options.insert(key.into(), value.into());
        self
    }

    /// Replace the configuration with the one loaded from `path`.
    ///
    /// On error the current configuration is left untouched.
    pub fn load_config<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let loaded = config::load_config(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "builder configuration replaced from file");
        self.config = loaded;
        Ok(self)
    }

    /// Current configuration
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Construct the backend through the registry
    pub async fn build(&self) -> Result<Arc<dyn Embedder>> {
        self.registry.create_with_config(self.config.clone()).await
    }
}

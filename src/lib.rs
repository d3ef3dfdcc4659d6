//! Embedder - pluggable client for text-embedding providers
//!
//! This library exposes one uniform operation set over any number of
//! embedding backends: single and batch embedding, chunked batch embedding,
//! dimension and model introspection, and health checks. Backends are looked
//! up by name in a provider registry, so new providers can be added without
//! touching the core.
//!
//! ## Features
//!
//! - **Provider Registry**: name-to-constructor map, safe for concurrent use
//! - **Fluent Builder**: chained setters or YAML configuration files
//! - **Batching**: order-preserving, fail-fast chunked embedding on top of a
//!   single-item primitive
//! - **Dimension Detection**: probed once when a backend is constructed
//! - **Ollama Provider**: registered out of the box as `ollama`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embedder::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut builder = embedder::builder("ollama").with_model("nomic-embed-text");
//!     builder.load_config("embedder.yaml")?;
//!     let backend = builder.build().await?;
//!
//!     let texts = vec!["hello".to_string(), "world".to_string()];
//!     let vectors = backend.batch_embed(&texts, 16).await?;
//!     assert_eq!(vectors[0].len(), backend.dimension());
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod embedding;
pub mod error;
pub mod observability;
pub mod registry;

pub use builder::EmbedderBuilder;
pub use config::{EmbedderConfig, OptionValue};
pub use embedding::Embedder;
pub use error::{EmbedderError, Result};
pub use registry::{ProviderFn, ProviderRegistry};

use std::future::Future;
use std::sync::Arc;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::EmbedderBuilder;
    pub use crate::config::{EmbedderConfig, OptionValue};
    pub use crate::embedding::{Embedder, OllamaEmbedder};
    pub use crate::error::{EmbedderError, Result};
    pub use crate::registry::ProviderRegistry;
}

/// Register a provider with the process-wide registry
pub fn register_provider<F, Fut>(name: impl Into<String>, constructor: F) -> Result<()>
where
    F: Fn(EmbedderConfig) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn Embedder>>> + Send + 'static,
{
    registry::global().register_provider(name, constructor)
}

/// Construct a provider from the process-wide registry with default settings
pub async fn create_embedder(provider: &str) -> Result<Arc<dyn Embedder>> {
    registry::global().create(provider).await
}

/// Construct the provider named in `config` from the process-wide registry
pub async fn create_embedder_with_config(config: EmbedderConfig) -> Result<Arc<dyn Embedder>> {
    registry::global().create_with_config(config).await
}

/// Providers registered with the process-wide registry
pub fn list_providers() -> Vec<String> {
    registry::global().list_providers()
}

/// Start building a backend for `provider`
pub fn builder(provider: impl Into<String>) -> EmbedderBuilder {
    EmbedderBuilder::new(provider)
}

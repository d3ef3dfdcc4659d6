//! Embedding provider for a local or remote Ollama server

use super::{batch, models::*, Embedder};
use crate::config::{validate_config, EmbedderConfig, OptionValue};
use crate::error::{EmbedderError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Provider name the Ollama backend is registered under
pub const PROVIDER_NAME: &str = "ollama";

/// Ollama embedding backend.
///
/// Ollama embeds one prompt per request, so batches go through the shared
/// sequential algorithms in [`batch`].
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    options: HashMap<String, OptionValue>,
    http_client: Client,
    dimension: usize,
}

impl OllamaEmbedder {
    /// Connect to the server, probe liveness and detect the model dimension
    pub async fn connect(config: EmbedderConfig) -> Result<Self> {
        validate_config(&config)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Self::with_http_client(config, http_client).await
    }

    /// Connect using a caller-supplied HTTP client
    pub async fn with_http_client(config: EmbedderConfig, http_client: Client) -> Result<Self> {
        let mut embedder = Self {
            base_url: batch::normalize_base_url(&config.base_url),
            model: config.model,
            options: config.options,
            http_client,
            dimension: 0,
        };

        embedder
            .check_liveness()
            .await
            .map_err(EmbedderError::unavailable)?;

        let dimension = batch::detect_dimension(|text| embedder.embed_text(text)).await?;
        embedder.dimension = dimension;

        info!(
            base_url = %embedder.base_url,
            model = %embedder.model,
            dimension,
            "Initialized Ollama embedder"
        );

        Ok(embedder)
    }

    /// Registry constructor for the `ollama` provider
    pub async fn construct(config: EmbedderConfig) -> Result<Arc<dyn Embedder>> {
        let embedder = Self::connect(config).await?;
        Ok(Arc::new(embedder))
    }

    /// Base URL with any trailing separator removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_liveness(&self) -> Result<()> {
        let url = format!("{}/api/version", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if let Ok(version) = response.json::<OllamaVersion>().await {
            debug!(version = %version.version, "Ollama server reachable");
        }
        Ok(())
    }

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            prompt: text,
            options: &self.options,
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            warn!(status = status.as_u16(), "Ollama embedding request failed");
            return Err(EmbedderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaEmbedResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_f32())
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_text(text).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health(&self) -> Result<()> {
        self.check_liveness().await.map_err(|e| {
            warn!(base_url = %self.base_url, error = %e, "Ollama health check failed");
            EmbedderError::unavailable(e)
        })
    }
}

//! Integration tests for the embedder public surface
//!
//! Backends are either an in-process fixed-vector provider or a mockito
//! server speaking the Ollama API, so no external services are needed.

use async_trait::async_trait;
use embedder::{
    create_embedder, create_embedder_with_config, embedding::batch, list_providers,
    register_provider, Embedder, EmbedderConfig, EmbedderError, ProviderRegistry, Result,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Provider whose primitive always returns a 4-element vector tagged by the first character
struct FixedEmbedder {
    model: String,
    dimension: usize,
}

impl FixedEmbedder {
    async fn connect(config: EmbedderConfig) -> Result<Self> {
        let mut embedder = Self {
            model: config.model,
            dimension: 0,
        };
        let dimension = batch::detect_dimension(|text| embedder.embed_single(text)).await?;
        embedder.dimension = dimension;
        Ok(embedder)
    }

    async fn construct(config: EmbedderConfig) -> Result<Arc<dyn Embedder>> {
        Ok(Arc::new(Self::connect(config).await?))
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let tag = text.chars().next().map(|c| c as u32 as f32).unwrap_or(0.0);
        Ok(vec![tag, 1.0, 2.0, 3.0])
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_end_to_end_with_fixed_provider() {
    let registry = Arc::new(ProviderRegistry::new());
    registry
        .register_provider("fixed", FixedEmbedder::construct)
        .unwrap();

    let backend = embedder::builder("fixed")
        .with_registry(registry.clone())
        .with_model("fixed-model")
        .build()
        .await
        .unwrap();

    assert_eq!(backend.dimension(), 4);
    assert_eq!(backend.model(), "fixed-model");

    let input = texts(&["a", "b", "c"]);
    let embedded = backend.embed(&input).await.unwrap();
    assert_eq!(embedded.len(), 3);
    for (text, vector) in input.iter().zip(&embedded) {
        assert_eq!(vector.len(), 4);
        assert_eq!(vector[0], text.chars().next().unwrap() as u32 as f32);
    }

    let batched = backend.batch_embed(&input, 2).await.unwrap();
    assert_eq!(batched, embedded);

    assert!(backend.embed(&[]).await.unwrap().is_empty());
    assert_eq!(backend.batch_embed(&input, 0).await.unwrap(), embedded);
}

#[tokio::test]
async fn test_global_registry_surface() {
    assert!(list_providers().contains(&"ollama".to_string()));

    register_provider("integration-fixed", FixedEmbedder::construct).unwrap();
    let err = register_provider("integration-fixed", FixedEmbedder::construct).unwrap_err();
    assert!(matches!(err, EmbedderError::DuplicateProvider(_)));
    assert!(list_providers().contains(&"integration-fixed".to_string()));

    let backend = create_embedder("integration-fixed").await.unwrap();
    assert_eq!(backend.model(), "qwen2.5:7b");
    assert_eq!(backend.dimension(), 4);

    let err = create_embedder("nonexistent").await.err().unwrap();
    assert!(matches!(err, EmbedderError::UnknownProvider(_)));
}

#[tokio::test]
async fn test_ollama_through_global_registry() {
    let mut server = Server::new_async().await;
    let _version = server
        .mock("GET", "/api/version")
        .with_status(200)
        .with_body(r#"{"version": "0.1.0"}"#)
        .create_async()
        .await;
    let _embeddings = server
        .mock("POST", "/api/embeddings")
        .match_body(Matcher::PartialJson(json!({ "model": "nomic-embed-text" })))
        .with_status(200)
        .with_body(r#"{"embedding": [0.1, 0.2, 0.3, 0.4]}"#)
        .create_async()
        .await;

    let config = EmbedderConfig::for_provider("ollama")
        .with_base_url(format!("{}/", server.url()))
        .with_model("nomic-embed-text")
        .with_timeout(Duration::from_secs(5));
    let backend = create_embedder_with_config(config).await.unwrap();

    assert_eq!(backend.dimension(), 4);
    assert!(backend.health().await.is_ok());

    let vectors = backend
        .batch_embed(&texts(&["one", "two", "three"]), 2)
        .await
        .unwrap();
    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.len() == 4));
}

#[tokio::test]
async fn test_builder_loads_yaml_file() {
    let mut server = Server::new_async().await;
    let _version = server
        .mock("GET", "/api/version")
        .with_status(200)
        .create_async()
        .await;
    let _embeddings = server
        .mock("POST", "/api/embeddings")
        .with_status(200)
        .with_body(r#"{"embedding": [1.0, 2.0]}"#)
        .create_async()
        .await;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "provider: \"ollama\"\nbase_url: \"{}\"\nmodel: \"all-minilm\"\ntimeout: \"10s\"\noptions:\n  temperature: 0.7\n",
        server.url()
    )
    .unwrap();

    let mut builder = embedder::builder("ignored").with_model("overwritten");
    builder.load_config(file.path()).unwrap();
    assert_eq!(builder.config().timeout, Duration::from_secs(10));

    let backend = builder.build().await.unwrap();
    assert_eq!(backend.model(), "all-minilm");
    assert_eq!(backend.dimension(), 2);
}

#[tokio::test]
async fn test_unreachable_backend_fails_construction() {
    let config = EmbedderConfig::for_provider("ollama")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));

    let err = create_embedder_with_config(config).await.err().unwrap();
    assert!(matches!(err, EmbedderError::BackendUnavailable(_)));
}

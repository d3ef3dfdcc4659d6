//! In-process embedder used by unit tests

use super::{batch, Embedder};
use crate::config::EmbedderConfig;
use crate::error::{EmbedderError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Deterministic embedder; every text maps to a vector derived from its bytes
pub struct StubEmbedder {
    model: String,
    dimension: usize,
    fail_on: Option<String>,
    delay: Option<Duration>,
    healthy: AtomicBool,
    single_calls: AtomicUsize,
    chunk_sizes: Mutex<Vec<usize>>,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            model: "stub-model".to_string(),
            dimension,
            fail_on: None,
            delay: None,
            healthy: AtomicBool::new(true),
            single_calls: AtomicUsize::new(0),
            chunk_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on = Some(text.into());
        self
    }

    /// Sleep before answering each text
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Registry constructor producing a stub that reports the configured model
    pub async fn construct(config: EmbedderConfig) -> Result<Arc<dyn Embedder>> {
        Ok(Arc::new(StubEmbedder::new(4).with_model(config.model)))
    }

    pub fn vector_for(text: &str, dimension: usize) -> Vec<f32> {
        let seed = text.bytes().map(u32::from).sum::<u32>() as f32;
        (0..dimension).map(|i| seed + i as f32).collect()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.chunk_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on.as_deref() == Some(text) {
            return Err(EmbedderError::Provider(format!("cannot embed {text}")));
        }
        Ok(Self::vector_for(text, self.dimension))
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.chunk_sizes.lock().unwrap().push(texts.len());
        batch::embed_each(self, texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health(&self) -> Result<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EmbedderError::unavailable(EmbedderError::Provider(
                "stub is down".to_string(),
            )))
        }
    }
}

//! Embedding backend contract and the bundled providers

pub mod batch;
pub mod models;
pub mod ollama;

#[cfg(test)]
pub(crate) mod testing;

pub use ollama::OllamaEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Capability set every embedding provider implements.
///
/// Only `embed_single`, `dimension`, `model` and `health` are required.
/// `embed` and `batch_embed` are layered on top of the single-item primitive
/// by the algorithms in [`batch`]. A ready backend holds no mutable state
/// and can be shared between tasks behind an `Arc`.
///
/// Dropping any returned future cancels the work it has in flight.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text
    async fn embed_single(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed every text in order, failing on the first text that fails
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        batch::embed_each(self, texts).await
    }

    /// Embed `texts` in consecutive chunks of at most `batch_size` items.
    ///
    /// A `batch_size` of 0 processes the whole input as a single chunk.
    async fn batch_embed(&self, texts: &[String], batch_size: usize) -> Result<Vec<Vec<f32>>> {
        batch::embed_chunked(self, texts, batch_size).await
    }

    /// Length of every vector this backend produces
    fn dimension(&self) -> usize;

    /// Model name used for embedding
    fn model(&self) -> &str;

    /// Re-run the liveness probe
    async fn health(&self) -> Result<()>;
}

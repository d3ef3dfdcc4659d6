//! Batching and dimension detection shared by every provider

use super::Embedder;
use crate::error::{EmbedderError, Result};
use std::future::Future;
use tracing::{debug, error};

/// Input used by the dimension probe
pub const PROBE_TEXT: &str = "test";

/// Longest text preview attached to a per-item error
pub const PREVIEW_LEN: usize = 50;

/// Embed texts one at a time through `embed_single`, preserving order.
///
/// Stops at the first failing item and reports its index; no partial
/// results are returned. An empty input issues no calls.
pub async fn embed_each<E>(embedder: &E, texts: &[String]) -> Result<Vec<Vec<f32>>>
where
    E: Embedder + ?Sized,
{
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    debug!(count = texts.len(), "embedding texts");

    let mut embeddings = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        match embedder.embed_single(text).await {
            Ok(embedding) => embeddings.push(embedding),
            Err(source) => {
                let preview = text_preview(text);
                error!(index, text_preview = %preview, error = %source, "failed to embed text");
                return Err(EmbedderError::EmbedItem {
                    index,
                    preview,
                    source: Box::new(source),
                });
            }
        }
    }

    debug!(count = embeddings.len(), "embedded texts");
    Ok(embeddings)
}

/// Split `texts` into chunks of `batch_size` and run `embed` on each in order.
///
/// The first failing chunk aborts the call and its error is returned as is.
pub async fn embed_chunked<E>(
    embedder: &E,
    texts: &[String],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>>
where
    E: Embedder + ?Sized,
{
    let chunk_size = if batch_size == 0 {
        texts.len().max(1)
    } else {
        batch_size
    };

    let mut embeddings = Vec::with_capacity(texts.len());
    for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
        debug!(chunk_index, chunk_len = chunk.len(), "embedding chunk");
        embeddings.extend(embedder.embed(chunk).await?);
    }

    Ok(embeddings)
}

/// Run one probe embedding and return its length.
///
/// Any failure, including an empty vector, is a dimension detection error.
pub async fn detect_dimension<F, Fut>(probe: F) -> Result<usize>
where
    F: FnOnce(&'static str) -> Fut,
    Fut: Future<Output = Result<Vec<f32>>>,
{
    let embedding = probe(PROBE_TEXT)
        .await
        .map_err(EmbedderError::dimension_detection)?;

    if embedding.is_empty() {
        return Err(EmbedderError::dimension_detection(
            EmbedderError::InvalidResponse("probe returned an empty embedding".to_string()),
        ));
    }

    debug!(dimension = embedding.len(), "detected embedding dimension");
    Ok(embedding.len())
}

/// Strip trailing path separators from a base URL
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Shorten `text` to at most [`PREVIEW_LEN`] characters for diagnostics
pub fn text_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LEN {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(PREVIEW_LEN - 3).collect();
    preview.push_str("...");
    preview
}

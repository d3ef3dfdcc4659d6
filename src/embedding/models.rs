//! Wire models for the Ollama embedding API

use crate::config::OptionValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for `POST /api/embeddings`
#[derive(Debug, Clone, Serialize)]
pub struct OllamaEmbedRequest<'a> {
    /// Model name
    pub model: &'a str,

    /// Text to embed
    pub prompt: &'a str,

    /// Model options forwarded from the configuration
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'a HashMap<String, OptionValue>,
}

fn no_options(options: &&HashMap<String, OptionValue>) -> bool {
    options.is_empty()
}

/// Response body of `POST /api/embeddings`
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaEmbedResponse {
    /// Embedding vector, double precision on the wire
    pub embedding: Vec<f64>,
}

impl OllamaEmbedResponse {
    /// Narrow the vector to single precision
    pub fn into_f32(self) -> Vec<f32> {
        self.embedding.into_iter().map(|v| v as f32).collect()
    }
}

/// Response body of `GET /api/version`
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaVersion {
    #[serde(default)]
    pub version: String,
}

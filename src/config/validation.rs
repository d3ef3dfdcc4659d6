//! Configuration validation

use super::EmbedderConfig;
use crate::error::{EmbedderError, Result};

/// Check that a configuration is complete enough to construct a backend
pub fn validate_config(config: &EmbedderConfig) -> Result<()> {
    if config.provider.is_empty() {
        return Err(EmbedderError::InvalidConfig(
            "Provider name cannot be empty".to_string(),
        ));
    }

    if config.base_url.is_empty() {
        return Err(EmbedderError::InvalidConfig(
            "Base URL cannot be empty".to_string(),
        ));
    }

    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        return Err(EmbedderError::InvalidConfig(format!(
            "Base URL must start with http:// or https://, got {}",
            config.base_url
        )));
    }

    if config.model.is_empty() {
        return Err(EmbedderError::InvalidConfig(
            "Model name cannot be empty".to_string(),
        ));
    }

    if config.timeout.is_zero() {
        return Err(EmbedderError::InvalidConfig(
            "Timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

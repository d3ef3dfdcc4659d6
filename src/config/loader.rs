//! Configuration loader with environment variable support

use super::EmbedderConfig;
use crate::error::{EmbedderError, Result};
use config::{Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Load configuration from a YAML file.
///
/// JSON and TOML are accepted when the file extension says so. Empty or
/// missing fields are back-filled from the process-wide default.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EmbedderConfig> {
    let path = path.as_ref();
    let contents = read_source(path)?;

    let source = config::Config::builder()
        .add_source(File::from_str(&contents, file_format(path)))
        .build()
        .map_err(|e| parse_error(path, e))?;

    finish(path, source)
}

/// Load configuration from a file with `EMBEDDER__*` environment overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<EmbedderConfig> {
    let path = path.as_ref();
    let contents = read_source(path)?;

    let source = config::Config::builder()
        .add_source(File::from_str(&contents, file_format(path)))
        .add_source(
            Environment::with_prefix("EMBEDDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| parse_error(path, e))?;

    finish(path, source)
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| EmbedderError::ConfigLoad {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|e| EmbedderError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => FileFormat::Json,
        Some("toml") => FileFormat::Toml,
        _ => FileFormat::Yaml,
    }
}

fn finish(path: &Path, source: config::Config) -> Result<EmbedderConfig> {
    let mut cfg: EmbedderConfig = source
        .try_deserialize()
        .map_err(|e| parse_error(path, e))?;
    cfg.fill_defaults();

    debug!(
        path = %path.display(),
        provider = %cfg.provider,
        model = %cfg.model,
        "loaded embedder configuration"
    );
    Ok(cfg)
}

fn parse_error(path: &Path, err: config::ConfigError) -> EmbedderError {
    EmbedderError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

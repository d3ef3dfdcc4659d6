//! Configuration model for embedding backends

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

pub mod loader;
pub mod validation;

pub use loader::{load_config, load_config_with_env};
pub use validation::validate_config;

pub const DEFAULT_PROVIDER: &str = "ollama";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "qwen2.5:7b";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static DEFAULT_CONFIG: OnceLock<EmbedderConfig> = OnceLock::new();

/// Process-wide default configuration.
///
/// Initialized on first access and never changed afterwards. Every empty or
/// zero field of a loaded configuration is back-filled from this value.
pub fn default_config() -> &'static EmbedderConfig {
    DEFAULT_CONFIG.get_or_init(EmbedderConfig::default)
}

/// Configuration for a single embedding backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Registered provider name
    #[serde(deserialize_with = "deserialize_nullable")]
    pub provider: String,

    /// Base URL of the backend service
    #[serde(deserialize_with = "deserialize_nullable")]
    pub base_url: String,

    /// Embedding model name
    #[serde(deserialize_with = "deserialize_nullable")]
    pub model: String,

    /// Per-request timeout, written as `"30s"`, `"500ms"`, `"1m30s"` or whole seconds
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,

    /// Provider-defined options, not interpreted by the core
    #[serde(deserialize_with = "deserialize_nullable")]
    pub options: HashMap<String, OptionValue>,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            options: HashMap::new(),
        }
    }
}

impl EmbedderConfig {
    /// Default configuration for the given provider
    pub fn for_provider(provider: impl Into<String>) -> Self {
        default_config().clone().with_provider(provider)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Look up a provider option
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Replace every empty or zero field with the process-wide default
    pub fn fill_defaults(&mut self) {
        let defaults = default_config();

        if self.provider.is_empty() {
            self.provider = defaults.provider.clone();
        }
        if self.base_url.is_empty() {
            self.base_url = defaults.base_url.clone();
        }
        if self.model.is_empty() {
            self.model = defaults.model.clone();
        }
        if self.timeout.is_zero() {
            self.timeout = defaults.timeout;
        }
    }
}

/// Heterogeneous option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
    Map(HashMap<String, OptionValue>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value, integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            OptionValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        OptionValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<HashMap<String, OptionValue>> for OptionValue {
    fn from(value: HashMap<String, OptionValue>) -> Self {
        OptionValue::Map(value)
    }
}

/// Parse a duration such as `30s`, `1.5s`, `250ms` or `1h2m3s`.
///
/// A bare number is read as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = input.parse::<f64>() {
        return nanos_to_duration(secs * 1e9, input);
    }

    let mut total = 0f64;
    let mut rest = input;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration {:?}", input));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", input))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, input)),
        };
        rest = &rest[unit_len..];
        total += value * scale;
    }

    nanos_to_duration(total, input)
}

fn nanos_to_duration(nanos: f64, input: &str) -> Result<Duration, String> {
    if !nanos.is_finite() || nanos < 0.0 || nanos > u64::MAX as f64 {
        return Err(format!("invalid duration {:?}", input));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

fn format_duration(duration: &Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else if duration.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}ns", duration.as_nanos())
    }
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(duration))
}

/// A key that is present but null reads as the empty value, so it gets back-filled
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurationVisitor;

    impl<'de> Visitor<'de> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a duration string like \"30s\" or a number of seconds")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
            parse_duration(v).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
            u64::try_from(v)
                .map(Duration::from_secs)
                .map_err(|_| E::custom(format!("negative duration {}", v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Duration, E> {
            nanos_to_duration(v * 1e9, &v.to_string()).map_err(E::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Duration, E> {
            Ok(Duration::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Duration, E> {
            Ok(Duration::ZERO)
        }

        fn visit_some<De: Deserializer<'de>>(self, deserializer: De) -> Result<Duration, De::Error> {
            deserializer.deserialize_any(DurationVisitor)
        }
    }

    deserializer.deserialize_any(DurationVisitor)
}

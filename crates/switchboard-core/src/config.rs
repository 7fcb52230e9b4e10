//! Gateway configuration, loaded from a JSON file.
//!
//! A missing file is not an error: the gateway falls back to a built-in
//! single-backend default so a dev deployment can start with no config at
//! all. A file that exists but fails to parse is fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bind host when the config file does not say otherwise.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port when the config file does not say otherwise.
pub const DEFAULT_PORT: u16 = 9100;

/// Problems loading or validating the configuration. All of these are fatal
/// at startup; nothing here is reachable once the gateway is serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration declares no backends")]
    NoBackends,

    #[error("backend entry has an empty key")]
    EmptyKey,

    #[error("duplicate backend key `{0}`")]
    DuplicateKey(String),

    #[error("backend `{0}` has an empty base_url")]
    EmptyBaseUrl(String),

    #[error("default_model `{0}` does not name a configured backend key")]
    UnknownDefaultModel(String),
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind address for the HTTP server.
    #[serde(default)]
    pub listen: ListenConfig,

    /// Key of the backend used when a request names no model or an unknown
    /// one. Defaults to the last configured backend.
    #[serde(default)]
    pub default_model: Option<String>,

    /// Backends in resolution order.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            default_model: None,
            backends: default_backends(),
        }
    }
}

/// HTTP listen address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// One backend inference service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Model key callers use to select this backend.
    pub key: String,

    /// Canonical model id the backend expects in payloads; defaults to the
    /// key itself.
    #[serde(default)]
    pub model_id: Option<String>,

    /// Base URL of the backend's OpenAI-style API, e.g.
    /// `http://10.0.0.4:8000/v1`.
    pub base_url: String,

    /// Headers applied verbatim to every request to this backend. The JSON
    /// content type is supplied by the HTTP client, not listed here.
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

impl BackendConfig {
    /// The model id sent to this backend: the explicit `model_id` if
    /// configured, otherwise the key.
    pub fn effective_model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(&self.key)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Authorization".to_string(), "Bearer EMPTY".to_string())])
}

fn default_backends() -> Vec<BackendConfig> {
    vec![BackendConfig {
        key: "local".to_string(),
        model_id: None,
        base_url: "http://127.0.0.1:8080/v1".to_string(),
        headers: default_headers(),
    }]
}

impl GatewayConfig {
    /// Load configuration from a JSON file, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        } else {
            tracing::warn!(
                path = %path.display(),
                "configuration file not found, using built-in defaults"
            );
            Ok(Self::default())
        }
    }
}

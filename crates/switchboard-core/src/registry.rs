//! The backend registry: an immutable, ordered model-to-backend table.
//!
//! Built once at startup from [`GatewayConfig`] and shared read-only for the
//! process lifetime. Resolution never mutates and never fails.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{ConfigError, GatewayConfig};

/// Static connection info for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Base URL of the backend's OpenAI-style API, without trailing slash.
    pub base_url: String,
    /// Canonical model id this backend expects in its `model` field.
    pub model_id: String,
    /// Headers applied verbatim to every request.
    pub headers: BTreeMap<String, String>,
}

/// One keyed registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEntry {
    pub key: String,
    pub descriptor: BackendDescriptor,
}

/// Outcome of model resolution: the backend to call plus the canonical id
/// that must appear in the outbound payload's `model` field, never the
/// caller-supplied string.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// Registry key of the selected entry.
    pub key: &'a str,
    /// Canonical model id of the selected entry.
    pub model_id: &'a str,
    pub backend: &'a BackendDescriptor,
}

/// Ordered model-to-backend table with a designated default entry.
#[derive(Debug, Clone)]
pub struct BackendRegistry {
    entries: Vec<BackendEntry>,
    default_index: usize,
}

impl BackendRegistry {
    /// Build and validate the registry from configuration.
    ///
    /// Absent an explicit `default_model`, the last configured backend is
    /// the default.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        if config.backends.is_empty() {
            return Err(ConfigError::NoBackends);
        }

        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(config.backends.len());
        for backend in &config.backends {
            if backend.key.is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if !seen.insert(backend.key.as_str()) {
                return Err(ConfigError::DuplicateKey(backend.key.clone()));
            }
            let base_url = backend.base_url.trim_end_matches('/');
            if base_url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl(backend.key.clone()));
            }
            entries.push(BackendEntry {
                key: backend.key.clone(),
                descriptor: BackendDescriptor {
                    base_url: base_url.to_string(),
                    model_id: backend.effective_model_id().to_string(),
                    headers: backend.headers.clone(),
                },
            });
        }

        let default_index = match &config.default_model {
            Some(name) => entries
                .iter()
                .position(|entry| entry.key == *name)
                .ok_or_else(|| ConfigError::UnknownDefaultModel(name.clone()))?,
            None => entries.len() - 1,
        };

        Ok(Self {
            entries,
            default_index,
        })
    }

    /// Exact-match lookup against entry keys and canonical model ids, in
    /// configured order. No partial or fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&BackendEntry> {
        self.entries
            .iter()
            .find(|entry| entry.key == name || entry.descriptor.model_id == name)
    }

    /// Resolve a caller-supplied model string to a backend.
    ///
    /// A missing, empty, or unknown model resolves to the default entry.
    /// That silent fallback is load-bearing: the chat handlers route every
    /// request through here and expect a usable backend back.
    pub fn resolve(&self, requested: Option<&str>) -> Resolution<'_> {
        let entry = requested
            .filter(|name| !name.is_empty())
            .and_then(|name| self.lookup(name))
            .unwrap_or_else(|| self.default_entry());
        Resolution {
            key: &entry.key,
            model_id: &entry.descriptor.model_id,
            backend: &entry.descriptor,
        }
    }

    /// The designated fallback entry.
    pub fn default_entry(&self) -> &BackendEntry {
        &self.entries[self.default_index]
    }

    /// Configured model keys in registry order, used as the static fallback
    /// list for discovery.
    pub fn model_keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Entries in configured order.
    pub fn entries(&self) -> &[BackendEntry] {
        &self.entries
    }
}

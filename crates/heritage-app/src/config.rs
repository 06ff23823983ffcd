// File: src/config.rs
// Purpose: Application configuration from heritage.toml

use anyhow::{Context, Result};
use heritage_router::RoutingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "heritage.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Deferred view loader configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoaderConfig {
    /// JSON chunk manifest (chunk name → view id); built-in manifest when absent
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Simulated fetch latency in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl AppConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Layers `BASE_URL` and then command-line flags over the file values
    pub fn with_overrides(mut self, base: Option<String>, manifest: Option<PathBuf>) -> Self {
        self.routing = self.routing.with_env_overrides().with_base_override(base);
        if manifest.is_some() {
            self.loader.manifest = manifest;
        }
        self
    }
}

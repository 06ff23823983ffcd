// File: src/config.rs
// Purpose: Routing configuration (the [routing] table of heritage.toml)

use serde::{Deserialize, Serialize};

/// Environment variable carrying the deployment base path
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Base path all routes are rooted at (e.g., "/heritage")
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Whether static segments match case-insensitively (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            case_insensitive: true,
        }
    }
}

impl RoutingConfig {
    /// Replaces the base path when an override is present and non-blank
    pub fn with_base_override(mut self, base: Option<String>) -> Self {
        if let Some(base) = base.filter(|b| !b.trim().is_empty()) {
            self.base_path = base;
        }
        self
    }

    /// Applies the `BASE_URL` environment variable, read once
    pub fn with_env_overrides(self) -> Self {
        self.with_base_override(std::env::var(BASE_URL_ENV).ok())
    }
}

//! Dashboard configuration loading.
//!
//! Configuration lives in a YAML file (default `~/.orchard/config.yaml`)
//! and covers the two endpoint addresses plus optional category palette
//! overrides. A missing file means defaults; an unreadable or invalid
//! file is a startup error. CLI flags override file values (see the
//! `orchard` binary).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OrchardError, Result};

/// Default push channel endpoint.
pub const DEFAULT_CHANNEL_URL: &str = "ws://localhost:5000/";

/// Default query service base path.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// User-facing dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Push channel endpoint (ws:// or wss://)
    pub channel_url: String,

    /// Query service base path (http:// or https://), no trailing slash
    pub api_base_url: String,

    /// Category label -> hex display color ("#rrggbb") overrides.
    ///
    /// Labels not listed here get colors from the built-in palette cycle;
    /// the core never interprets the color values.
    pub palette: HashMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            palette: HashMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Get the default configuration file path (`~/.orchard/config.yaml`).
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".orchard")
            .join("config.yaml")
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults. A file that exists but cannot
    /// be read or parsed is an error - a half-understood configuration is
    /// worse than none.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| OrchardError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| OrchardError::config_invalid(path, e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Set the channel URL.
    pub fn with_channel_url(mut self, url: impl Into<String>) -> Self {
        self.channel_url = url.into();
        self
    }

    /// Set the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Validate endpoint addresses.
    pub fn validate(&self) -> Result<()> {
        let channel = Url::parse(&self.channel_url).map_err(|e| {
            OrchardError::config_validation(format!("channel_url '{}': {e}", self.channel_url))
        })?;
        if !matches!(channel.scheme(), "ws" | "wss") {
            return Err(OrchardError::config_validation(format!(
                "channel_url '{}' must use ws:// or wss://",
                self.channel_url
            )));
        }

        let api = Url::parse(&self.api_base_url).map_err(|e| {
            OrchardError::config_validation(format!("api_base_url '{}': {e}", self.api_base_url))
        })?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(OrchardError::config_validation(format!(
                "api_base_url '{}' must use http:// or https://",
                self.api_base_url
            )));
        }

        Ok(())
    }
}

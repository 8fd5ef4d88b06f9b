//! Error types for Orchard operations.
//!
//! This module defines [`OrchardError`], the error enum covering all error
//! cases across the dashboard. Errors are designed for visibility: no
//! silent failures at the surface, clear actionable messages. Note that
//! per-message decode failures on the live feed are deliberately NOT
//! represented here - they are local, logged, and dropped (see
//! `orchard-client::feed`).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`OrchardError`].
pub type Result<T> = std::result::Result<T, OrchardError>;

/// Error type for all Orchard operations.
#[derive(Debug, Error)]
pub enum OrchardError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file could not be read
    #[error("Failed to read configuration at {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Channel Errors
    // =========================================================================
    /// Could not establish the push channel
    #[error("Failed to connect to channel {url}: {message}")]
    ChannelConnect { url: String, message: String },

    // =========================================================================
    // Snapshot API Errors
    // =========================================================================
    /// The query service returned a non-success status
    #[error("Snapshot API error on {endpoint}: {status} - {message}")]
    SnapshotApi {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Transport-level failure reaching the query service
    #[error("Snapshot request failed for {endpoint}: {message}")]
    SnapshotTransport { endpoint: String, message: String },

    // =========================================================================
    // Parsing Errors
    // =========================================================================
    /// JSON parsing error
    #[error("JSON parse error in {context}: {message}")]
    JsonParse {
        context: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // =========================================================================
    // TUI Errors
    // =========================================================================
    /// Terminal initialization failed
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    /// Terminal restore failed
    #[error("Failed to restore terminal: {message}")]
    TerminalRestore { message: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in Orchard)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OrchardError {
    // =========================================================================
    // Constructor helpers for common error patterns
    // =========================================================================

    /// Create a ConfigInvalid error
    pub fn config_invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a ConfigValidation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a ChannelConnect error
    pub fn channel_connect(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChannelConnect {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a SnapshotTransport error
    pub fn snapshot_transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SnapshotTransport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a JSON parse error
    pub fn json_parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            context: context.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Error classification helpers
    // =========================================================================

    /// Returns true if this error is recoverable (retry may succeed).
    ///
    /// Channel and snapshot failures leave the dashboard stale or empty but
    /// never take the process down.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ChannelConnect { .. }
                | Self::SnapshotApi { .. }
                | Self::SnapshotTransport { .. }
        )
    }

    /// Returns true if this error is fatal (should exit the application)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TerminalInit { .. } | Self::Internal { .. })
    }

    /// Returns true if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. } | Self::ConfigInvalid { .. } | Self::ConfigValidation { .. }
        )
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => {
                Some("Check YAML syntax in ~/.orchard/config.yaml")
            }
            Self::ConfigValidation { .. } => {
                Some("channel_url must be ws:// or wss://, api_base_url http:// or https://")
            }
            Self::ChannelConnect { .. } => {
                Some("Check that the classification server is running and the channel URL is correct")
            }
            Self::SnapshotApi { .. } | Self::SnapshotTransport { .. } => {
                Some("Check that the query service is reachable at the configured API base URL")
            }
            Self::TerminalInit { .. } => Some("Try running in a different terminal"),
            _ => None,
        }
    }
}

//! Shared type definitions used across Orchard crates.
//!
//! This module provides the data model for the dashboard: the
//! classification event, the derived-view element types, the connection
//! lifecycle state, and the wire frame format spoken by the push channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category label, e.g. "red apple".
pub type Category = String;

/// One observation of an item assigned to a category.
///
/// Immutable once created. Snapshot history carries server-assigned ids;
/// live events get a session-local id from the reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationEvent {
    /// Unique identifier within the current window
    pub id: i64,
    /// Category label assigned by the classifier
    pub category: Category,
    /// When the classification happened
    pub timestamp: DateTime<Utc>,
}

/// Running count of events for a single category.
///
/// The tally is an ordered list of these, one per observed category in
/// first-observation order (the same shape the `/statistics` endpoint
/// returns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category label
    pub category: Category,
    /// Number of events observed for this category this session
    pub count: u64,
}

/// One entry of the bounded activity window.
///
/// Each point represents a single event for trend display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPoint {
    /// Display time label ("%H:%M:%S", local time)
    pub label: String,
    /// Fixed unit count (always 1 per event)
    pub value: u64,
}

/// Lifecycle state of the push channel.
///
/// Transitions are driven solely by channel lifecycle events (open,
/// error, close), never by application logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No channel is open
    #[default]
    Disconnected,
    /// Channel is open and delivering frames
    Connected,
    /// The channel hit a transport-level error
    Error,
}

impl ConnectionState {
    /// Returns true if the channel is currently open.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns the display label for the status indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connected => "Connected",
            Self::Error => "Connection error",
        }
    }
}

/// Payload of a `new_classification` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPayload {
    /// Category label assigned by the classifier
    pub category: Category,
    /// When the classification happened (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
}

/// A decoded frame from the push channel.
///
/// Every inbound frame carries a `type` tag and a `data` body. Only
/// `new_classification` drives reconciliation; any other tag decodes to
/// [`Frame::Unknown`] and is ignored by the reconciler. Frames that fail
/// to decode at all never become a `Frame` - the connection manager drops
/// them before they reach application code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// A new classification event from the server
    NewClassification {
        /// Event payload
        data: ClassificationPayload,
    },
    /// Any frame with an unrecognized type tag
    #[serde(other)]
    Unknown,
}

impl Frame {
    /// Decode a frame from raw channel text.
    pub fn parse(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Encode a frame for transmission.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns true if this frame drives reconciliation.
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::NewClassification { .. })
    }
}

//! Synthetic demo feed.
//!
//! Stands in for the real push channel when no server is available
//! (`orchard --demo`). It speaks the exact same interface as the real
//! feed - a [`FeedHandle`] plus a [`FeedEvent`] stream - so the rest of
//! the dashboard cannot tell the difference, and tests can drive the same
//! path with deterministic sequences. It is a fixture, not a design
//! element: nothing outside the binary's `--demo` wiring may depend on
//! it.

use std::time::Duration;

use chrono::Utc;
use rand::seq::SliceRandom;
use tokio::sync::{mpsc, watch};
use tracing::info;

use orchard_core::types::{ClassificationPayload, ConnectionState, Frame};

use crate::feed::{FeedEvent, FeedHandle};

/// Configuration for the synthetic feed.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Delay between generated events
    pub interval: Duration,

    /// Categories to draw from, uniformly at random
    pub categories: Vec<String>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            categories: vec!["red apple".to_string(), "green apple".to_string()],
        }
    }
}

/// Spawn the synthetic feed on the current tokio runtime.
///
/// Reports `Connected` immediately, then emits one random classification
/// frame per interval until the handle is closed, at which point it
/// reports `Disconnected` - the same lifecycle shape the real channel
/// produces.
pub fn spawn_synthetic(
    config: SyntheticConfig,
) -> (FeedHandle, mpsc::UnboundedReceiver<FeedEvent>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(ConnectionState::Disconnected);
    let (frame_tx, frame_rx) = watch::channel(None);
    // Outbound sends have nowhere to go in demo mode; the queue is
    // accepted and ignored, matching fire-and-forget semantics.
    let (outbound_tx, _outbound_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        info!(interval_ms = config.interval.as_millis() as u64, "synthetic feed started");
        status_tx.send_replace(ConnectionState::Connected);
        let _ = event_tx.send(FeedEvent::Status(ConnectionState::Connected));

        loop {
            tokio::select! {
                _ = tokio::time::sleep(config.interval) => {
                    let category = config
                        .categories
                        .choose(&mut rand::thread_rng())
                        .cloned()
                        .unwrap_or_else(|| "unclassified".to_string());
                    let frame = Frame::NewClassification {
                        data: ClassificationPayload {
                            category,
                            timestamp: Utc::now(),
                        },
                    };
                    frame_tx.send_replace(Some(frame.clone()));
                    let _ = event_tx.send(FeedEvent::Frame(frame));
                }
                _ = shutdown_rx.changed() => {
                    status_tx.send_replace(ConnectionState::Disconnected);
                    let _ = event_tx.send(FeedEvent::Status(ConnectionState::Disconnected));
                    info!("synthetic feed stopped");
                    break;
                }
            }
        }
    });

    (
        FeedHandle::new(status_rx, frame_rx, outbound_tx, shutdown_tx),
        event_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthetic_reports_connected_then_frames() {
        let config = SyntheticConfig {
            interval: Duration::from_millis(10),
            categories: vec!["red apple".to_string()],
        };
        let (mut handle, mut events) = spawn_synthetic(config);

        let first = events.recv().await.expect("status event");
        assert_eq!(first, FeedEvent::Status(ConnectionState::Connected));
        assert!(handle.status().is_connected());

        match events.recv().await.expect("frame event") {
            FeedEvent::Frame(Frame::NewClassification { data }) => {
                assert_eq!(data.category, "red apple");
            }
            other => panic!("expected classification frame, got {other:?}"),
        }
        assert!(handle.last_frame().is_some());

        handle.close();
        // Drain until the disconnect shows up; generated frames may be in
        // flight ahead of it.
        loop {
            match events.recv().await.expect("disconnect event") {
                FeedEvent::Status(ConnectionState::Disconnected) => break,
                FeedEvent::Frame(_) => continue,
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut handle, _events) = spawn_synthetic(SyntheticConfig::default());
        handle.close();
        handle.close();
    }
}

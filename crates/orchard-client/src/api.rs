//! HTTP snapshot client for the query service.
//!
//! The dashboard seeds itself once on activation from two independent
//! fetches: aggregate category counts and recent event history. Either
//! fetch may fail on its own; a failure leaves the corresponding initial
//! state empty and is not retried.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use orchard_core::error::{OrchardError, Result};
use orchard_core::types::{CategoryCount, ClassificationEvent};

/// Request timeout for snapshot fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the query service.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    client: reqwest::Client,
    base_url: String,
}

impl SnapshotClient {
    /// Create a client for the given base URL (e.g. `http://host:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OrchardError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the recent event history, newest first.
    pub async fn classifications(&self) -> Result<Vec<ClassificationEvent>> {
        self.get_json("/classifications", &[]).await
    }

    /// Fetch aggregate per-category counts.
    pub async fn statistics(&self) -> Result<Vec<CategoryCount>> {
        self.get_json("/statistics", &[]).await
    }

    /// Fetch event history filtered to a time range.
    pub async fn classifications_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClassificationEvent>> {
        self.get_json(
            "/classifications/range",
            &[
                ("startDate", start.to_rfc3339()),
                ("endDate", end.to_rfc3339()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "snapshot fetch");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| OrchardError::snapshot_transport(endpoint, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OrchardError::SnapshotApi {
                endpoint: endpoint.to_string(),
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OrchardError::snapshot_transport(endpoint, e.to_string()))
    }
}

/// Results delivered from the snapshot service to the update loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent {
    /// Aggregate per-category counts
    Statistics(Vec<CategoryCount>),
    /// Recent event history, newest first
    Classifications(Vec<ClassificationEvent>),
}

/// Spawn the snapshot service on the current tokio runtime.
///
/// One load is issued immediately; sending `()` on the returned trigger
/// requests another (the `r` hotkey). Each load runs the two fetches
/// concurrently and reports each result independently - a failed fetch is
/// logged and simply produces no event, leaving that part of the state as
/// it was. Late results after the update loop has torn down go nowhere:
/// the receiver is gone and the send is a no-op.
pub fn spawn_snapshot_service(
    client: SnapshotClient,
) -> (
    mpsc::UnboundedSender<()>,
    mpsc::UnboundedReceiver<SnapshotEvent>,
) {
    let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel::<()>();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let (statistics, classifications) =
                tokio::join!(client.statistics(), client.classifications());

            match statistics {
                Ok(counts) => {
                    let _ = event_tx.send(SnapshotEvent::Statistics(counts));
                }
                Err(e) => warn!(error = %e, "statistics snapshot failed"),
            }
            match classifications {
                Ok(events) => {
                    let _ = event_tx.send(SnapshotEvent::Classifications(events));
                }
                Err(e) => warn!(error = %e, "classifications snapshot failed"),
            }

            // Wait for the next refresh request; channel closed means the
            // view is gone and the service winds down with it.
            if trigger_rx.recv().await.is_none() {
                break;
            }
        }
    });

    (trigger_tx, event_rx)
}

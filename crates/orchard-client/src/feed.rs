//! WebSocket connection manager for the live classification feed.
//!
//! One [`FeedHandle`] owns one persistent channel to the server. The
//! channel task runs on the tokio runtime and reports everything that
//! happens - lifecycle transitions and decoded frames - as [`FeedEvent`]s
//! over a single mpsc channel, so the application update loop is the only
//! writer of dashboard state.
//!
//! ## Lifecycle
//!
//! On spawn the task opens the channel. Successful open transitions to
//! `Connected`; a transport-level error transitions to `Error`; a close
//! transitions to `Disconnected`. Unless reconnection is disabled, the
//! task then retries with exponential backoff plus jitter. Closing the
//! handle tears the channel down unconditionally and exactly once, even
//! if the connection never came up.
//!
//! ## Decoding
//!
//! Inbound text frames must decode as a [`Frame`]. Malformed payloads are
//! fatal to that message only: they are logged and dropped, the previous
//! last-frame memo stays unchanged, and the connection stays up.
//!
//! ## Outbound sends
//!
//! [`FeedHandle::send`] is fire-and-forget: if the channel is not
//! currently open the frame is dropped silently, with no queuing and no
//! error to the caller. Any backlog that slips into the outbound queue
//! around a disconnect is discarded before the next connection attempt.
//! See DESIGN.md for why this policy is preserved as-is.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use orchard_core::types::{ConnectionState, Frame};

/// Default initial reconnect backoff.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Default reconnect backoff cap.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Events delivered from the feed task to the application update loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Channel lifecycle transition
    Status(ConnectionState),
    /// A decoded inbound frame
    Frame(Frame),
}

/// Configuration for the feed connection.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Channel endpoint (ws:// or wss://)
    pub url: String,

    /// First reconnect delay after a drop
    pub initial_backoff: Duration,

    /// Upper bound for the reconnect delay
    pub max_backoff: Duration,

    /// Whether to reconnect after a drop or error
    pub reconnect: bool,
}

impl FeedConfig {
    /// Create a config for the given endpoint with default backoff.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
            reconnect: true,
        }
    }

    /// Disable reconnection (single-shot connection, used in tests).
    pub fn without_reconnect(mut self) -> Self {
        self.reconnect = false;
        self
    }
}

/// Handle to a running feed connection.
///
/// Created on view activation, closed on deactivation. The handle is the
/// lifecycle-scoped owner of the channel; there is no process-wide
/// connection state.
pub struct FeedHandle {
    status_rx: watch::Receiver<ConnectionState>,
    frame_rx: watch::Receiver<Option<Frame>>,
    outbound_tx: mpsc::UnboundedSender<String>,
    shutdown_tx: Option<watch::Sender<bool>>,
}

impl FeedHandle {
    pub(crate) fn new(
        status_rx: watch::Receiver<ConnectionState>,
        frame_rx: watch::Receiver<Option<Frame>>,
        outbound_tx: mpsc::UnboundedSender<String>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            status_rx,
            frame_rx,
            outbound_tx,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Current channel lifecycle state.
    pub fn status(&self) -> ConnectionState {
        *self.status_rx.borrow()
    }

    /// Most recently received decoded frame, or `None` if none yet.
    pub fn last_frame(&self) -> Option<Frame> {
        self.frame_rx.borrow().clone()
    }

    /// Transmit a frame if the channel is currently open.
    ///
    /// Fire-and-forget: drops the frame silently when the channel is not
    /// open. No queuing, no error surfaced to the caller.
    pub fn send(&self, frame: &Frame) {
        if !self.status().is_connected() {
            debug!("channel not open, dropping outbound frame");
            return;
        }
        match frame.to_json() {
            Ok(text) => {
                let _ = self.outbound_tx.send(text);
            }
            Err(e) => warn!(error = %e, "failed to encode outbound frame"),
        }
    }

    /// Tear the channel down.
    ///
    /// Idempotent; the underlying close runs exactly once even if the
    /// connection never came up or the handle is also dropped.
    pub fn close(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
            info!("feed channel closed");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Spawn the feed task on the current tokio runtime.
///
/// Returns the lifecycle handle plus the event stream for the update
/// loop. Dropping the receiver does not stop the task; closing (or
/// dropping) the handle does.
pub fn spawn_feed(config: FeedConfig) -> (FeedHandle, mpsc::UnboundedReceiver<FeedEvent>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(ConnectionState::Disconnected);
    let (frame_tx, frame_rx) = watch::channel(None);
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(run_feed(
        config,
        status_tx,
        frame_tx,
        outbound_rx,
        shutdown_rx,
        event_tx,
    ));

    (
        FeedHandle::new(status_rx, frame_rx, outbound_tx, shutdown_tx),
        event_rx,
    )
}

/// Compute the next backoff delay (doubling, capped).
fn next_backoff(current: Duration, max: Duration) -> Duration {
    (current * 2).min(max)
}

/// Apply +/-20% jitter to a backoff delay.
fn jittered(base: Duration) -> Duration {
    let factor: f64 = rand::thread_rng().gen_range(0.8..1.2);
    Duration::from_secs_f64(base.as_secs_f64() * factor)
}

async fn run_feed(
    config: FeedConfig,
    status_tx: watch::Sender<ConnectionState>,
    frame_tx: watch::Sender<Option<Frame>>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    mut shutdown_rx: watch::Receiver<bool>,
    event_tx: mpsc::UnboundedSender<FeedEvent>,
) {
    let transition = |state: ConnectionState| {
        status_tx.send_replace(state);
        let _ = event_tx.send(FeedEvent::Status(state));
    };

    let mut backoff = config.initial_backoff;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        // Anything queued while the channel was down is dropped, not sent.
        while outbound_rx.try_recv().is_ok() {}

        match connect_async(config.url.as_str()).await {
            Ok((mut ws, _response)) => {
                backoff = config.initial_backoff;
                info!(url = %config.url, "feed connected");
                transition(ConnectionState::Connected);

                loop {
                    tokio::select! {
                        inbound = ws.next() => match inbound {
                            Some(Ok(Message::Text(text))) => match Frame::parse(&text) {
                                Ok(frame) => {
                                    frame_tx.send_replace(Some(frame.clone()));
                                    let _ = event_tx.send(FeedEvent::Frame(frame));
                                }
                                // Fatal to this message only: drop it, keep
                                // the previous frame memo, stay connected.
                                Err(e) => warn!(error = %e, "dropping malformed frame"),
                            },
                            Some(Ok(Message::Close(_))) | None => {
                                info!("feed disconnected by server");
                                transition(ConnectionState::Disconnected);
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                warn!(error = %e, "feed transport error");
                                transition(ConnectionState::Error);
                                break;
                            }
                        },
                        outbound = outbound_rx.recv() => match outbound {
                            Some(text) => {
                                if let Err(e) = ws.send(Message::Text(text)).await {
                                    warn!(error = %e, "feed send failed");
                                    transition(ConnectionState::Error);
                                    break;
                                }
                            }
                            // Sender gone means the handle is gone; the
                            // shutdown signal follows, so wind down now.
                            None => {
                                let _ = ws.close(None).await;
                                transition(ConnectionState::Disconnected);
                                return;
                            }
                        },
                        _ = shutdown_rx.changed() => {
                            let _ = ws.close(None).await;
                            transition(ConnectionState::Disconnected);
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(url = %config.url, error = %e, "feed connect failed");
                transition(ConnectionState::Error);
            }
        }

        if !config.reconnect {
            break;
        }

        let wait = jittered(backoff);
        debug!(wait_ms = wait.as_millis() as u64, "feed reconnecting after backoff");
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shutdown_rx.changed() => break,
        }
        backoff = next_backoff(backoff, config.max_backoff);
    }
}

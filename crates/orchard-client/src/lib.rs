//! # orchard-client
//!
//! Network clients for the Orchard dashboard:
//!
//! - [`feed`] - the persistent WebSocket connection manager delivering
//!   live classification frames
//! - [`api`] - the HTTP snapshot client that seeds initial state
//! - [`synthetic`] - a demo feed that stands in for the real channel
//!   behind the same interface
//!
//! All three deliver their results as messages to the single-threaded
//! application update loop; none of them mutates dashboard state
//! directly.

pub mod api;
pub mod feed;
pub mod synthetic;

pub use api::{SnapshotClient, SnapshotEvent, spawn_snapshot_service};
pub use feed::{FeedConfig, FeedEvent, FeedHandle, spawn_feed};
pub use synthetic::{SyntheticConfig, spawn_synthetic};

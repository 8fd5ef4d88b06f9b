//! # orchard-core
//!
//! Core types, errors, and utilities for the Orchard dashboard.
//!
//! This crate provides:
//! - [`OrchardError`] - Error types for all Orchard operations
//! - [`logging`] - Tracing setup and log management utilities
//! - [`config`] - Dashboard configuration loading
//! - [`types`] - Shared type definitions used across Orchard crates
//! - [`state`] - The live-state reconciler that folds incoming
//!   classification events into the derived dashboard views
//!
//! ## Example
//!
//! ```no_run
//! use orchard_core::state::DashboardState;
//! use orchard_core::types::Frame;
//!
//! let mut state = DashboardState::new();
//! let frame = Frame::parse(
//!     r#"{"type":"new_classification","data":{"category":"red apple","timestamp":"2026-08-05T12:00:00Z"}}"#,
//! ).unwrap();
//! state.apply_frame(frame);
//! assert_eq!(state.total_count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use error::{OrchardError, Result};
pub use logging::{LogGuard, init_logging};
pub use state::DashboardState;
pub use types::{
    ActivityPoint, CategoryCount, ClassificationEvent, ConnectionState, Frame,
};

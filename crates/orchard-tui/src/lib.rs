//! Terminal UI for the Orchard dashboard.
//!
//! This crate provides the Ratatui-based terminal interface: it renders
//! the category distribution, total counts, the rolling activity trend,
//! and the recent-classifications table, with a connection indicator in
//! the header. Rendering is a pure projection of
//! [`orchard_core::DashboardState`]; the update loop in [`app`] is the
//! single writer of that state.
//!
//! ## Hotkeys
//!
//! - `o` - Overview (all panels)
//! - `e` - Events table
//! - `r` - Refresh the snapshot
//! - `?` or `h` - Help
//! - `q` - Quit
//! - `Tab` - Cycle views
//! - `Esc` - Cancel/back

pub mod activity_panel;
pub mod app;
pub mod distribution_panel;
pub mod event;
pub mod events_panel;
pub mod palette;
pub mod view;

pub use app::{App, AppChannels, AppResult};
pub use palette::CategoryPalette;
pub use view::View;

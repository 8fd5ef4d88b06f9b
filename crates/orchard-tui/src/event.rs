//! Event handling for the Orchard TUI.
//!
//! Provides keyboard input handling and event routing. Input never
//! mutates the reconciled dashboard views directly; it only drives
//! navigation, the help overlay, snapshot refresh, and quitting.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::View;

/// Application-level events that can trigger state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Switch to a specific view
    SwitchView(View),
    /// Cycle to the next view
    NextView,
    /// Cycle to the previous view
    PrevView,
    /// Show help overlay
    ShowHelp,
    /// Request application quit
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// Re-request the snapshot
    Refresh,
    /// Cancel current operation
    Cancel,
    /// Navigate up in the events table
    NavigateUp,
    /// Navigate down in the events table
    NavigateDown,
    /// No action needed
    None,
}

/// Input handler for converting key events to app events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event and return the corresponding app event.
    pub fn handle_key(&self, key: KeyEvent) -> AppEvent {
        // Ctrl+C always force quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppEvent::ForceQuit;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Char('Q') => AppEvent::Quit,

            // Help
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => AppEvent::ShowHelp,

            // View navigation hotkeys
            KeyCode::Char('o') | KeyCode::Char('O') => AppEvent::SwitchView(View::Overview),
            KeyCode::Char('e') | KeyCode::Char('E') => AppEvent::SwitchView(View::Events),

            // Tab cycling
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    AppEvent::PrevView
                } else {
                    AppEvent::NextView
                }
            }
            KeyCode::BackTab => AppEvent::PrevView,

            // List navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::NavigateUp,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::NavigateDown,

            // Refresh
            KeyCode::Char('r') | KeyCode::Char('R') => AppEvent::Refresh,

            // Cancel
            KeyCode::Esc => AppEvent::Cancel,

            _ => AppEvent::None,
        }
    }
}

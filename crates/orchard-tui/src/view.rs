//! View types and navigation for the Orchard TUI.
//!
//! Views represent the different screens available in the dashboard.

use std::fmt;

/// Available views in the Orchard dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Overview showing all panels: distribution, totals, activity, events
    #[default]
    Overview,
    /// Full-height recent-classifications table
    Events,
}

impl View {
    /// Returns the hotkey character for this view.
    pub fn hotkey(&self) -> char {
        match self {
            View::Overview => 'o',
            View::Events => 'e',
        }
    }

    /// Returns the display title for this view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Events => "Events",
        }
    }

    /// All views in display order (for Tab cycling).
    pub const ALL: [View; 2] = [View::Overview, View::Events];

    /// Returns the next view in the cycle (for Tab navigation).
    pub fn next(&self) -> View {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Returns the previous view in the cycle (for Shift+Tab navigation).
    pub fn prev(&self) -> View {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }

    /// Try to parse a view from a hotkey character.
    pub fn from_hotkey(key: char) -> Option<View> {
        match key.to_ascii_lowercase() {
            'o' => Some(View::Overview),
            'e' => Some(View::Events),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Layout mode based on terminal width.
///
/// The overview splits distribution and totals side by side when the
/// terminal is wide enough, and stacks everything otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Two-column top area (>= 100 cols)
    Wide,
    /// Everything stacked
    Narrow,
}

impl LayoutMode {
    /// Pick a layout mode for the given terminal width.
    pub fn from_width(width: u16) -> Self {
        if width >= 100 {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle_roundtrip() {
        for view in View::ALL {
            assert_eq!(view.next().prev(), view);
        }
        assert_eq!(View::Overview.next(), View::Events);
        assert_eq!(View::Events.next(), View::Overview);
    }

    #[test]
    fn test_from_hotkey() {
        assert_eq!(View::from_hotkey('o'), Some(View::Overview));
        assert_eq!(View::from_hotkey('E'), Some(View::Events));
        assert_eq!(View::from_hotkey('x'), None);
    }

    #[test]
    fn test_layout_mode_thresholds() {
        assert_eq!(LayoutMode::from_width(80), LayoutMode::Narrow);
        assert_eq!(LayoutMode::from_width(100), LayoutMode::Wide);
        assert_eq!(LayoutMode::from_width(200), LayoutMode::Wide);
    }
}

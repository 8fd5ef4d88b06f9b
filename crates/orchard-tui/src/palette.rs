//! Category palette for the Orchard TUI.
//!
//! Maps category labels to display colors. The core treats the label as
//! an opaque key; color is purely a rendering concern. Known labels get
//! built-in defaults, configuration can override or add labels, and any
//! category seen for the first time at runtime is assigned the next
//! color from a fixed cycle so it stays stable for the session.

use std::collections::HashMap;

use ratatui::style::Color;
use tracing::warn;

/// Built-in label colors (matching the upstream dashboard palette).
const DEFAULTS: [(&str, Color); 2] = [
    ("red apple", Color::Rgb(0x85, 0x06, 0x06)),
    ("green apple", Color::Rgb(0x22, 0xc5, 0x5e)),
];

/// Assignment cycle for labels without a configured color.
const CYCLE: [Color; 6] = [
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Blue,
    Color::LightRed,
    Color::LightGreen,
];

/// Category label -> display color mapping.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: HashMap<String, Color>,
    next_cycle: usize,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryPalette {
    /// Create a palette with only the built-in defaults.
    pub fn new() -> Self {
        Self {
            colors: DEFAULTS
                .iter()
                .map(|(label, color)| (label.to_string(), *color))
                .collect(),
            next_cycle: 0,
        }
    }

    /// Create a palette with configuration overrides applied.
    ///
    /// Values must be "#rrggbb" hex strings; entries that fail to parse
    /// are logged and skipped, leaving the default or cycle assignment
    /// for that label.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut palette = Self::new();
        for (label, hex) in overrides {
            match parse_hex_color(hex) {
                Some(color) => {
                    palette.colors.insert(label.clone(), color);
                }
                None => warn!(label = %label, value = %hex, "ignoring unparseable palette color"),
            }
        }
        palette
    }

    /// Ensure a label has a color, assigning from the cycle if new.
    pub fn ensure(&mut self, label: &str) {
        if !self.colors.contains_key(label) {
            let color = CYCLE[self.next_cycle % CYCLE.len()];
            self.next_cycle += 1;
            self.colors.insert(label.to_string(), color);
        }
    }

    /// Look up the color for a label.
    ///
    /// Labels the app has folded into state always have an assignment
    /// (via [`ensure`](Self::ensure)); anything else falls back to gray.
    pub fn color(&self, label: &str) -> Color {
        self.colors.get(label).copied().unwrap_or(Color::Gray)
    }
}

/// Parse a "#rrggbb" hex color string.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let palette = CategoryPalette::new();
        assert_eq!(palette.color("red apple"), Color::Rgb(0x85, 0x06, 0x06));
        assert_eq!(palette.color("green apple"), Color::Rgb(0x22, 0xc5, 0x5e));
    }

    #[test]
    fn test_override_parsing() {
        let mut overrides = HashMap::new();
        overrides.insert("red apple".to_string(), "#ff0000".to_string());
        overrides.insert("plum".to_string(), "#800080".to_string());
        overrides.insert("broken".to_string(), "#nope".to_string());

        let palette = CategoryPalette::from_overrides(&overrides);
        assert_eq!(palette.color("red apple"), Color::Rgb(0xff, 0x00, 0x00));
        assert_eq!(palette.color("plum"), Color::Rgb(0x80, 0x00, 0x80));
        // Unparseable override falls back to the unknown-label color.
        assert_eq!(palette.color("broken"), Color::Gray);
    }

    #[test]
    fn test_cycle_assignment_is_stable() {
        let mut palette = CategoryPalette::new();
        palette.ensure("yellow apple");
        palette.ensure("crabapple");
        let first = palette.color("yellow apple");
        let second = palette.color("crabapple");

        assert_eq!(first, CYCLE[0]);
        assert_eq!(second, CYCLE[1]);

        // Re-ensuring does not reassign.
        palette.ensure("yellow apple");
        assert_eq!(palette.color("yellow apple"), first);
    }

    #[test]
    fn test_ensure_keeps_defaults() {
        let mut palette = CategoryPalette::new();
        palette.ensure("red apple");
        assert_eq!(palette.color("red apple"), Color::Rgb(0x85, 0x06, 0x06));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#850606"), Some(Color::Rgb(0x85, 0x06, 0x06)));
        assert_eq!(parse_hex_color("850606"), None);
        assert_eq!(parse_hex_color("#85060"), None);
        assert_eq!(parse_hex_color("#85060g"), None);
    }
}

//! Real-time activity trend panel.
//!
//! Projects the bounded activity window as a sparkline. Every point has
//! unit value, so the trend reads as event density over the window; the
//! title carries the time-label range so the window's span is visible.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use orchard_core::state::DashboardState;

/// Human-readable range of the window's time labels, e.g.
/// "12:00:01 - 12:00:15".
pub fn label_range(state: &DashboardState) -> String {
    let window = state.activity();
    match (window.front(), window.back()) {
        (Some(first), Some(last)) if first.label != last.label => {
            format!("{} - {}", first.label, last.label)
        }
        (Some(only), _) => only.label.clone(),
        _ => String::new(),
    }
}

/// Draw the activity sparkline.
pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let window = state.activity();
    let title = if window.is_empty() {
        " Real-time Activity ".to_string()
    } else {
        format!(" Real-time Activity  {} ({} events) ", label_range(state), window.len())
    };

    let values: Vec<u64> = window.iter().map(|point| point.value).collect();

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&values)
        .style(Style::default().fg(Color::Magenta));

    frame.render_widget(sparkline, area);
}

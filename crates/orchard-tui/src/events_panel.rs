//! Recent classifications table.
//!
//! The overview shows the newest [`RENDER_RECENT`] events; the Events
//! view shows everything retained (up to the recent-list cap) with
//! scrolling.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};

use orchard_core::state::{DashboardState, RENDER_RECENT};
use orchard_core::types::ClassificationEvent;

use crate::palette::CategoryPalette;

/// Format an event timestamp for table display.
pub fn format_event_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn event_row<'a>(event: &'a ClassificationEvent, palette: &CategoryPalette) -> Row<'a> {
    let badge = Span::styled(
        format!(" {} ", event.category),
        Style::default()
            .bg(palette.color(&event.category))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    Row::new(vec![
        Cell::from(event.id.to_string()),
        Cell::from(badge),
        Cell::from(format_event_time(&event.timestamp)),
    ])
}

fn table<'a>(rows: Vec<Row<'a>>, title: &'a str) -> Table<'a> {
    Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["ID", "Category", "Timestamp"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title))
}

/// Draw the overview table (newest [`RENDER_RECENT`] events).
pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &CategoryPalette) {
    let rows: Vec<Row> = state
        .recent_rendered()
        .map(|event| event_row(event, palette))
        .collect();
    frame.render_widget(table(rows, " Recent Classifications "), area);
}

/// Draw the full retained list with a scroll offset.
pub fn render_full(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    palette: &CategoryPalette,
    scroll_offset: usize,
) {
    let rows: Vec<Row> = state
        .recent()
        .iter()
        .skip(scroll_offset)
        .map(|event| event_row(event, palette))
        .collect();
    frame.render_widget(table(rows, " Recent Classifications (all retained) "), area);
}

/// Clamp a scroll offset to the retained list.
pub fn max_scroll(state: &DashboardState) -> usize {
    state.recent().len().saturating_sub(1)
}

/// Number of rows the overview table will show for this state.
pub fn overview_rows(state: &DashboardState) -> usize {
    state.recent().len().min(RENDER_RECENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use orchard_core::types::{ClassificationPayload, Frame as WireFrame};

    fn state_with_events(count: i64) -> DashboardState {
        let mut state = DashboardState::new();
        let base = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        for i in 0..count {
            state.apply_frame(WireFrame::NewClassification {
                data: ClassificationPayload {
                    category: "red apple".into(),
                    timestamp: base + Duration::seconds(i),
                },
            });
        }
        state
    }

    #[test]
    fn test_overview_rows_capped_at_render_limit() {
        assert_eq!(overview_rows(&state_with_events(3)), 3);
        assert_eq!(overview_rows(&state_with_events(15)), RENDER_RECENT);
    }

    #[test]
    fn test_max_scroll_tracks_retained_list() {
        assert_eq!(max_scroll(&DashboardState::new()), 0);
        assert_eq!(max_scroll(&state_with_events(5)), 4);
        // Retention cap bounds the scroll range too.
        assert_eq!(max_scroll(&state_with_events(30)), 19);
    }
}

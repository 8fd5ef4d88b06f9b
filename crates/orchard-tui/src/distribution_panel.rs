//! Category distribution and totals panels.
//!
//! Both panels project the same tally: the distribution shows each
//! category's share of all observed events, the totals chart shows the
//! absolute counts.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use orchard_core::state::DashboardState;

use crate::palette::CategoryPalette;

/// Width of the share bar in the distribution rows.
const BAR_WIDTH: usize = 20;

/// A category's share of the total, in percent.
pub fn share_percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

/// Renders a horizontal bar of `width` cells filled to `value / max`.
pub fn render_bar(value: f64, max: f64, width: usize, filled_char: char, empty_char: char) -> String {
    let pct = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (pct * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!(
        "{}{}",
        filled_char.to_string().repeat(filled),
        empty_char.to_string().repeat(empty)
    )
}

/// Draw the per-category distribution rows.
pub fn render_distribution(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    palette: &CategoryPalette,
) {
    let block = Block::default().borders(Borders::ALL).title(" Distribution ");

    let total = state.total_count();
    let lines: Vec<Line> = if state.tally().is_empty() {
        vec![Line::from(Span::styled(
            "No classifications yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .tally()
            .iter()
            .map(|entry| {
                let pct = share_percent(entry.count, total);
                let bar = render_bar(entry.count as f64, total as f64, BAR_WIDTH, '█', '░');
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(palette.color(&entry.category))),
                    Span::styled(
                        format!("{:<14}", entry.category),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(bar, Style::default().fg(palette.color(&entry.category))),
                    Span::raw(format!(" {pct:>5.1}% ({})", entry.count)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the absolute totals bar chart.
pub fn render_totals(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    palette: &CategoryPalette,
) {
    let block = Block::default().borders(Borders::ALL).title(" Total Count ");

    let bars: Vec<Bar> = state
        .tally()
        .iter()
        .map(|entry| {
            Bar::default()
                .value(entry.count)
                .label(Line::from(entry.category.clone()))
                .style(Style::default().fg(palette.color(&entry.category)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(12)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(0, 0), 0.0);
        assert_eq!(share_percent(1, 4), 25.0);
        assert_eq!(share_percent(46, 46), 100.0);
    }

    #[test]
    fn test_render_bar_full_and_empty() {
        assert_eq!(render_bar(1.0, 1.0, 4, '#', '-'), "####");
        assert_eq!(render_bar(0.0, 1.0, 4, '#', '-'), "----");
        assert_eq!(render_bar(1.0, 2.0, 4, '#', '-'), "##--");
    }

    #[test]
    fn test_render_bar_zero_max() {
        assert_eq!(render_bar(5.0, 0.0, 3, '#', '-'), "---");
    }
}

//! Main application state and loop for the Orchard TUI.
//!
//! The `App` struct owns the reconciled [`DashboardState`] and is its
//! single writer. Live frames, channel lifecycle transitions, and
//! snapshot results all arrive as messages on channels and are folded in
//! one at a time (run-to-completion), so a render pass can never observe
//! a half-applied event. After teardown every incoming message is a
//! no-op: late fetch or feed callbacks cannot mutate state.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::debug;

use orchard_client::api::SnapshotEvent;
use orchard_client::feed::{FeedEvent, FeedHandle};
use orchard_core::state::DashboardState;
use orchard_core::types::Frame as WireFrame;

use crate::activity_panel;
use crate::distribution_panel;
use crate::event::{AppEvent, InputHandler};
use crate::events_panel;
use crate::palette::CategoryPalette;
use crate::view::{LayoutMode, View};

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Frame duration for the render/input loop (~30 FPS is plenty for a
/// dashboard fed by second-scale events).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Header timestamp cache duration (update every second).
const TIMESTAMP_CACHE_DURATION: Duration = Duration::from_secs(1);

/// Channel ends wiring the app to its data sources.
pub struct AppChannels {
    /// Handle to the live feed (None only in tests)
    pub feed: Option<FeedHandle>,
    /// Live feed events
    pub feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
    /// Snapshot load results
    pub snapshot_rx: mpsc::UnboundedReceiver<SnapshotEvent>,
    /// Trigger for re-requesting a snapshot
    pub refresh_tx: mpsc::UnboundedSender<()>,
}

/// Main application state.
pub struct App {
    /// Reconciled dashboard state (this loop is its only writer)
    state: DashboardState,
    /// Category color assignments
    palette: CategoryPalette,
    /// Input handler for key events
    input_handler: InputHandler,
    /// Current active view
    current_view: View,
    /// Whether the app should quit
    should_quit: bool,
    /// Whether to show the help overlay
    show_help: bool,
    /// Status message to display in the footer
    status_message: Option<String>,
    /// Scroll position in the Events view
    scroll_offset: usize,
    /// Dirty flag - whether UI needs redraw
    dirty: bool,
    /// Set on teardown; guards against post-teardown state writes
    torn_down: bool,
    /// Feed handle, taken on teardown
    feed: Option<FeedHandle>,
    feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
    snapshot_rx: mpsc::UnboundedReceiver<SnapshotEvent>,
    refresh_tx: mpsc::UnboundedSender<()>,
    /// Cached timestamp for header (updated every second)
    cached_timestamp: Option<String>,
    last_timestamp_update: Instant,
}

impl App {
    /// Create a new app wired to its data sources.
    pub fn new(channels: AppChannels, palette: CategoryPalette) -> Self {
        Self {
            state: DashboardState::new(),
            palette,
            input_handler: InputHandler::new(),
            current_view: View::default(),
            should_quit: false,
            show_help: false,
            status_message: None,
            scroll_offset: 0,
            dirty: true,
            torn_down: false,
            feed: channels.feed,
            feed_rx: channels.feed_rx,
            snapshot_rx: channels.snapshot_rx,
            refresh_tx: channels.refresh_tx,
            cached_timestamp: None,
            last_timestamp_update: Instant::now(),
        }
    }

    /// Returns the reconciled dashboard state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Returns the current view.
    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Returns whether the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns whether help overlay is visible.
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Mark the UI as dirty (needs redraw).
    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if UI needs redraw and clear the dirty flag.
    fn take_dirty(&mut self) -> bool {
        if self.dirty {
            self.dirty = false;
            true
        } else {
            false
        }
    }

    /// Get cached timestamp or update if expired.
    fn get_cached_timestamp(&mut self) -> String {
        if self.cached_timestamp.is_none()
            || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION
        {
            self.cached_timestamp =
                Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
            self.last_timestamp_update = Instant::now();
        }
        self.cached_timestamp.clone().unwrap_or_default()
    }

    // =========================================================================
    // Data intake
    // =========================================================================

    /// Drain pending feed and snapshot messages into state.
    ///
    /// Each message is folded completely before the next is read.
    pub fn poll_data(&mut self) {
        if self.torn_down {
            return;
        }
        while let Ok(event) = self.feed_rx.try_recv() {
            self.on_feed_event(event);
        }
        while let Ok(event) = self.snapshot_rx.try_recv() {
            self.on_snapshot_event(event);
        }
    }

    /// Fold one feed event into state.
    pub fn on_feed_event(&mut self, event: FeedEvent) {
        if self.torn_down {
            debug!("dropping feed event after teardown");
            return;
        }
        match event {
            FeedEvent::Status(connection) => {
                self.state.set_connection(connection);
            }
            FeedEvent::Frame(frame) => {
                if let WireFrame::NewClassification { data } = &frame {
                    self.palette.ensure(&data.category);
                }
                self.state.apply_frame(frame);
            }
        }
        self.mark_dirty();
    }

    /// Fold one snapshot result into state.
    pub fn on_snapshot_event(&mut self, event: SnapshotEvent) {
        if self.torn_down {
            debug!("dropping snapshot event after teardown");
            return;
        }
        match event {
            SnapshotEvent::Statistics(counts) => {
                for entry in &counts {
                    self.palette.ensure(&entry.category);
                }
                self.state.seed_statistics(counts);
            }
            SnapshotEvent::Classifications(events) => {
                for event in &events {
                    self.palette.ensure(&event.category);
                }
                self.state.seed_classifications(events);
            }
        }
        self.mark_dirty();
    }

    /// Tear the view down: close the channel and refuse all further
    /// state mutation. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            feed.close();
        }
        self.torn_down = true;
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let event = self.input_handler.handle_key(key);
        self.handle_app_event(event);
    }

    /// Handle an application event.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SwitchView(view) => self.switch_view(view),
            AppEvent::NextView => self.switch_view(self.current_view.next()),
            AppEvent::PrevView => self.switch_view(self.current_view.prev()),
            AppEvent::ShowHelp => {
                self.show_help = true;
                self.mark_dirty();
            }
            AppEvent::Quit | AppEvent::ForceQuit => self.should_quit = true,
            AppEvent::Refresh => {
                let _ = self.refresh_tx.send(());
                self.status_message = Some("Refreshing snapshot...".to_string());
                self.mark_dirty();
            }
            AppEvent::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.switch_view(View::Overview);
                }
                self.mark_dirty();
            }
            AppEvent::NavigateUp => {
                if self.scroll_offset > 0 {
                    self.scroll_offset -= 1;
                    self.mark_dirty();
                }
            }
            AppEvent::NavigateDown => {
                if self.scroll_offset < events_panel::max_scroll(&self.state) {
                    self.scroll_offset += 1;
                    self.mark_dirty();
                }
            }
            AppEvent::None => {}
        }
    }

    /// Switch to a specific view.
    pub fn switch_view(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.scroll_offset = 0;
            self.status_message = Some(format!(
                "{} (Press {} to return here)",
                view.title(),
                view.hotkey()
            ));
            self.mark_dirty();
        }
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    /// Run the main application loop.
    pub fn run(&mut self) -> AppResult<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.run_loop(&mut terminal);

        // Deactivation closes the channel unconditionally, even if the
        // loop bailed out early.
        self.shutdown();

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// The inner event loop.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> AppResult<()> {
        while !self.should_quit {
            self.poll_data();

            // Redraw when state changed, or at minimum once a second for
            // the header clock.
            let needs_redraw = self.take_dirty()
                || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION;
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
            }

            if event::poll(FRAME_DURATION)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match self.current_view {
            View::Overview => self.draw_overview(frame, chunks[1]),
            View::Events => {
                events_panel::render_full(
                    frame,
                    chunks[1],
                    &self.state,
                    &self.palette,
                    self.scroll_offset,
                );
            }
        }
        self.draw_footer(frame, chunks[2]);

        if self.show_help {
            self.draw_help_overlay(frame, area);
        }
    }

    /// Draw the header bar: title, clock, connection indicator.
    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let now = self.get_cached_timestamp();
        let title = format!(" Orchard - {} ", self.current_view.title());

        let connection = self.state.connection();
        let status_color = if connection.is_connected() {
            Color::Green
        } else {
            Color::Red
        };
        let status_text = format!("● {}", connection.label());
        let totals = format!("{} total / {} live", self.state.total_count(), self.state.live_total());

        let right_len = now.len() + 2 + totals.len() + 2 + status_text.len();
        let spacing = area
            .width
            .saturating_sub(title.len() as u16 + right_len as u16 + 2) as usize;

        let header = Paragraph::new(Line::from(vec![
            Span::styled(title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(spacing)),
            Span::styled(now, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(totals, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(header, area);
    }

    /// Draw the overview: latest banner, distribution + totals, activity
    /// trend, recent table.
    fn draw_overview(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Latest classification banner
                Constraint::Percentage(35), // Distribution + totals
                Constraint::Length(4),      // Activity trend
                Constraint::Min(6),         // Recent table
            ])
            .split(area);

        self.draw_latest_banner(frame, rows[0]);

        match LayoutMode::from_width(area.width) {
            LayoutMode::Wide => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[1]);
                distribution_panel::render_distribution(frame, columns[0], &self.state, &self.palette);
                distribution_panel::render_totals(frame, columns[1], &self.state, &self.palette);
            }
            LayoutMode::Narrow => {
                distribution_panel::render_distribution(frame, rows[1], &self.state, &self.palette);
            }
        }

        activity_panel::render(frame, rows[2], &self.state);
        events_panel::render(frame, rows[3], &self.state, &self.palette);
    }

    /// Draw the latest-classification banner.
    fn draw_latest_banner(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Latest Classification ");

        let line = match self.state.latest() {
            Some(payload) => Line::from(vec![
                Span::styled(
                    format!(" {} ", payload.category),
                    Style::default()
                        .bg(self.palette.color(&payload.category))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    events_panel::format_event_time(&payload.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                "Waiting for live events...",
                Style::default().fg(Color::DarkGray),
            )),
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    /// Draw the footer with hotkey hints and the status message.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hotkey_style = Style::default().fg(Color::Cyan);
        let mut hints = vec![
            Span::styled("[o]", hotkey_style),
            Span::raw("Overview "),
            Span::styled("[e]", hotkey_style),
            Span::raw("Events "),
            Span::styled("[r]", hotkey_style),
            Span::raw("Refresh "),
            Span::styled("[?]", hotkey_style),
            Span::raw("Help "),
            Span::styled("[q]", hotkey_style),
            Span::raw("Quit"),
        ];

        if let Some(ref message) = self.status_message {
            hints.push(Span::raw("  "));
            hints.push(Span::styled(
                message.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let footer = Paragraph::new(Line::from(hints))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }

    /// Draw the help overlay.
    fn draw_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(""),
            Line::from("  o      Overview"),
            Line::from("  e      Events table"),
            Line::from("  Tab    Cycle views"),
            Line::from("  r      Refresh snapshot"),
            Line::from("  j/k    Scroll events"),
            Line::from("  Esc    Back / dismiss"),
            Line::from("  q      Quit"),
        ];

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help, popup);
    }
}

/// Compute a centered rect with the given percentage dimensions.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use orchard_core::state::{CAP_RECENT, RENDER_RECENT};
    use orchard_core::types::{
        CategoryCount, ClassificationEvent, ClassificationPayload, ConnectionState,
    };

    fn make_app() -> (
        App,
        mpsc::UnboundedSender<FeedEvent>,
        mpsc::UnboundedSender<SnapshotEvent>,
        mpsc::UnboundedReceiver<()>,
    ) {
        let (feed_tx, feed_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let app = App::new(
            AppChannels {
                feed: None,
                feed_rx,
                snapshot_rx,
                refresh_tx,
            },
            CategoryPalette::new(),
        );
        (app, feed_tx, snapshot_tx, refresh_rx)
    }

    fn classification(category: &str, secs: i64) -> FeedEvent {
        FeedEvent::Frame(WireFrame::NewClassification {
            data: ClassificationPayload {
                category: category.into(),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
                    + ChronoDuration::seconds(secs),
            },
        })
    }

    fn render_app(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut result = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    result.push_str(cell.symbol());
                }
            }
            result.push('\n');
        }
        result
    }

    fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
        buffer_to_string(buffer).contains(text)
    }

    #[test]
    fn test_feed_frame_updates_all_views() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();

        feed_tx.send(FeedEvent::Status(ConnectionState::Connected)).unwrap();
        feed_tx.send(classification("red apple", 0)).unwrap();
        app.poll_data();

        assert_eq!(app.state().connection(), ConnectionState::Connected);
        assert_eq!(app.state().total_count(), 1);
        assert_eq!(app.state().recent().len(), 1);
        assert_eq!(app.state().activity().len(), 1);
        assert_eq!(
            app.state().latest().map(|p| p.category.as_str()),
            Some("red apple")
        );
    }

    #[test]
    fn test_snapshot_events_seed_state() {
        let (mut app, _feed_tx, snapshot_tx, _refresh_rx) = make_app();

        snapshot_tx
            .send(SnapshotEvent::Statistics(vec![
                CategoryCount {
                    category: "red apple".into(),
                    count: 45,
                },
                CategoryCount {
                    category: "green apple".into(),
                    count: 38,
                },
            ]))
            .unwrap();
        snapshot_tx
            .send(SnapshotEvent::Classifications(vec![ClassificationEvent {
                id: 1,
                category: "red apple".into(),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 5, 11, 59, 0).unwrap(),
            }]))
            .unwrap();
        app.poll_data();

        assert_eq!(app.state().total_count(), 83);
        assert_eq!(app.state().recent().len(), 1);
        // Seeding never touches the activity window.
        assert!(app.state().activity().is_empty());
    }

    #[test]
    fn test_snapshot_then_live_event() {
        let (mut app, feed_tx, snapshot_tx, _refresh_rx) = make_app();

        snapshot_tx
            .send(SnapshotEvent::Statistics(vec![CategoryCount {
                category: "red apple".into(),
                count: 45,
            }]))
            .unwrap();
        let history: Vec<ClassificationEvent> = (0..CAP_RECENT as i64)
            .map(|i| ClassificationEvent {
                id: CAP_RECENT as i64 - i,
                category: "green apple".into(),
                timestamp: Utc.with_ymd_and_hms(2026, 8, 5, 11, 0, 0).unwrap()
                    - ChronoDuration::minutes(i),
            })
            .collect();
        snapshot_tx
            .send(SnapshotEvent::Classifications(history))
            .unwrap();
        feed_tx.send(classification("red apple", 0)).unwrap();
        app.poll_data();

        assert_eq!(app.state().tally()[0].count, 46);
        assert_eq!(app.state().recent().len(), CAP_RECENT);
        assert_eq!(
            app.state().recent()[0].category, "red apple",
            "live event lands at the head"
        );
        assert_eq!(app.state().activity().len(), 1);
    }

    #[test]
    fn test_heartbeat_leaves_views_unchanged() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();

        feed_tx.send(classification("red apple", 0)).unwrap();
        app.poll_data();
        let recent_before = app.state().recent().clone();
        let tally_before = app.state().tally().to_vec();

        feed_tx.send(FeedEvent::Frame(WireFrame::Unknown)).unwrap();
        app.poll_data();

        assert_eq!(app.state().recent(), &recent_before);
        assert_eq!(app.state().tally(), tally_before.as_slice());
    }

    #[test]
    fn test_teardown_guards_late_messages() {
        let (mut app, feed_tx, snapshot_tx, _refresh_rx) = make_app();

        app.shutdown();

        // In-flight results arriving after teardown must not mutate state.
        feed_tx.send(classification("red apple", 0)).unwrap();
        snapshot_tx
            .send(SnapshotEvent::Statistics(vec![CategoryCount {
                category: "red apple".into(),
                count: 45,
            }]))
            .unwrap();
        app.poll_data();

        assert_eq!(app.state().total_count(), 0);
        assert!(app.state().recent().is_empty());
        assert!(app.state().activity().is_empty());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (mut app, _feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        app.shutdown();
        app.shutdown();
    }

    #[test]
    fn test_refresh_sends_trigger() {
        let (mut app, _feed_tx, _snapshot_tx, mut refresh_rx) = make_app();

        app.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
        assert!(refresh_rx.try_recv().is_ok());
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _feed_tx, _snapshot_tx, _refresh_rx) = make_app();

        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit());
    }

    #[test]
    fn test_view_switching_and_scroll_reset() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        for i in 0..5 {
            feed_tx.send(classification("red apple", i)).unwrap();
        }
        app.poll_data();

        app.handle_app_event(AppEvent::SwitchView(View::Events));
        assert_eq!(app.current_view(), View::Events);

        app.handle_app_event(AppEvent::NavigateDown);
        app.handle_app_event(AppEvent::NavigateDown);
        assert_eq!(app.scroll_offset, 2);

        // Scroll never runs past the retained list.
        for _ in 0..50 {
            app.handle_app_event(AppEvent::NavigateDown);
        }
        assert_eq!(app.scroll_offset, 4);

        app.handle_app_event(AppEvent::SwitchView(View::Overview));
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_help_overlay_toggle() {
        let (mut app, _feed_tx, _snapshot_tx, _refresh_rx) = make_app();

        app.handle_app_event(AppEvent::ShowHelp);
        assert!(app.show_help());
        app.handle_app_event(AppEvent::Cancel);
        assert!(!app.show_help());
    }

    #[test]
    fn test_render_overview_contains_panels() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        feed_tx.send(FeedEvent::Status(ConnectionState::Connected)).unwrap();
        feed_tx.send(classification("red apple", 0)).unwrap();
        app.poll_data();

        let buffer = render_app(&mut app, 120, 40);
        assert!(buffer_contains(&buffer, "Orchard"));
        assert!(buffer_contains(&buffer, "Distribution"));
        assert!(buffer_contains(&buffer, "Total Count"));
        assert!(buffer_contains(&buffer, "Real-time Activity"));
        assert!(buffer_contains(&buffer, "Recent Classifications"));
        assert!(buffer_contains(&buffer, "Connected"));
        assert!(buffer_contains(&buffer, "red apple"));
    }

    #[test]
    fn test_render_disconnected_indicator() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        feed_tx.send(FeedEvent::Status(ConnectionState::Error)).unwrap();
        app.poll_data();

        let buffer = render_app(&mut app, 120, 40);
        assert!(buffer_contains(&buffer, "Connection error"));
    }

    #[test]
    fn test_render_table_caps_rows() {
        let (mut app, feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        for i in 0..25 {
            feed_tx.send(classification("red apple", i)).unwrap();
        }
        app.poll_data();

        assert_eq!(app.state().recent().len(), CAP_RECENT);
        assert_eq!(app.state().recent_rendered().count(), RENDER_RECENT);

        // Rendering never mutates state.
        let before = app.state().recent().clone();
        let _ = render_app(&mut app, 120, 40);
        assert_eq!(app.state().recent(), &before);
    }

    #[test]
    fn test_render_help_overlay() {
        let (mut app, _feed_tx, _snapshot_tx, _refresh_rx) = make_app();
        app.handle_app_event(AppEvent::ShowHelp);

        let buffer = render_app(&mut app, 120, 40);
        assert!(buffer_contains(&buffer, "Help"));
        assert!(buffer_contains(&buffer, "Refresh snapshot"));
    }
}

//! Live-state reconciliation for the dashboard.
//!
//! [`DashboardState`] is the single owner of all derived view state: the
//! recent-events list, the per-category tally, and the bounded activity
//! window. It is the only component that mutates derived state from an
//! incoming event, and it updates all three views in one call so a render
//! pass can never observe a half-applied event.
//!
//! The state is a plain struct folded by reducer methods; there is one
//! logical writer (the application update loop) and no locking.

use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};

use crate::types::{
    ActivityPoint, Category, CategoryCount, ClassificationEvent, ConnectionState, Frame,
};

/// Events retained in the recent list (the renderer shows fewer).
pub const CAP_RECENT: usize = 20;

/// Events actually rendered in the recent-classifications table.
pub const RENDER_RECENT: usize = 10;

/// Points retained in the activity window.
pub const CAP_ACTIVITY: usize = 15;

/// Format a timestamp as the activity/table display label.
pub fn time_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// All dashboard state derived from the event stream.
///
/// Seeded once from the snapshot API, then folded forward one frame at a
/// time. State only grows or slides forward; there is no rollback.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Current channel lifecycle state
    connection: ConnectionState,
    /// Recent events, newest first, capped at [`CAP_RECENT`]
    recent: VecDeque<ClassificationEvent>,
    /// Per-category running counts in first-observation order
    tally: Vec<CategoryCount>,
    /// Sliding window of activity points, oldest first, capped at [`CAP_ACTIVITY`]
    activity: VecDeque<ActivityPoint>,
    /// Most recently received decoded frame, regardless of type
    last_frame: Option<Frame>,
    /// Live events folded this session (excludes snapshot seeding)
    live_total: u64,
    /// Next session-local event id
    next_id: i64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Create empty state.
    ///
    /// Session-local ids start at the current unix epoch milliseconds,
    /// which keeps them clear of the small server-assigned ids carried by
    /// snapshot history.
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::default(),
            recent: VecDeque::with_capacity(CAP_RECENT),
            tally: Vec::new(),
            activity: VecDeque::with_capacity(CAP_ACTIVITY),
            last_frame: None,
            live_total: 0,
            next_id: Utc::now().timestamp_millis(),
        }
    }

    // =========================================================================
    // Accessors (the renderer consumes these, never the fields)
    // =========================================================================

    /// Current channel lifecycle state.
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Most recently received decoded frame, or `None` before the first.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// The latest classification payload, if the most recent frame was one.
    pub fn latest(&self) -> Option<&crate::types::ClassificationPayload> {
        match &self.last_frame {
            Some(Frame::NewClassification { data }) => Some(data),
            _ => None,
        }
    }

    /// Recent events, newest first.
    pub fn recent(&self) -> &VecDeque<ClassificationEvent> {
        &self.recent
    }

    /// The slice of recent events the table renders (at most
    /// [`RENDER_RECENT`], newest first).
    pub fn recent_rendered(&self) -> impl Iterator<Item = &ClassificationEvent> {
        self.recent.iter().take(RENDER_RECENT)
    }

    /// Per-category running counts in first-observation order.
    pub fn tally(&self) -> &[CategoryCount] {
        &self.tally
    }

    /// Sum of all tally counts.
    pub fn total_count(&self) -> u64 {
        self.tally.iter().map(|c| c.count).sum()
    }

    /// Live events folded this session (excludes snapshot seeding).
    pub fn live_total(&self) -> u64 {
        self.live_total
    }

    /// The activity window, oldest first.
    pub fn activity(&self) -> &VecDeque<ActivityPoint> {
        &self.activity
    }

    // =========================================================================
    // Reducers
    // =========================================================================

    /// Apply a channel lifecycle transition.
    ///
    /// The connection manager is the only caller; application logic never
    /// invents transitions.
    pub fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    /// Fold one decoded frame into state.
    ///
    /// Every decoded frame replaces the last-frame memo. Only
    /// `new_classification` frames touch the derived views; any other type
    /// is remembered but otherwise ignored. Returns true if the derived
    /// views changed.
    pub fn apply_frame(&mut self, frame: Frame) -> bool {
        let changed = if let Frame::NewClassification { data } = &frame {
            self.record(data.category.clone(), data.timestamp);
            true
        } else {
            false
        };
        self.last_frame = Some(frame);
        changed
    }

    /// Fold one classification into all three derived views.
    ///
    /// This runs to completion before the caller can observe state, which
    /// is what makes the per-event atomicity guarantee hold: a render pass
    /// sees either none or all of the event's effects.
    fn record(&mut self, category: Category, timestamp: DateTime<Utc>) {
        let event = ClassificationEvent {
            id: self.next_id,
            category,
            timestamp,
        };
        self.next_id += 1;
        self.live_total += 1;

        // Recent list: prepend, then drop the tail beyond capacity.
        self.recent.push_front(event.clone());
        self.recent.truncate(CAP_RECENT);

        // Tally: lazily created per category, increment-only.
        match self
            .tally
            .iter_mut()
            .find(|c| c.category == event.category)
        {
            Some(entry) => entry.count += 1,
            None => self.tally.push(CategoryCount {
                category: event.category.clone(),
                count: 1,
            }),
        }

        // Activity window: append one unit point, evict FIFO over capacity.
        self.activity.push_back(ActivityPoint {
            label: time_label(&event.timestamp),
            value: 1,
        });
        while self.activity.len() > CAP_ACTIVITY {
            self.activity.pop_front();
        }
    }

    /// Install snapshot category counts.
    ///
    /// Replaces the tally wholesale; live counts folded afterwards stack
    /// on top of these.
    pub fn seed_statistics(&mut self, counts: Vec<CategoryCount>) {
        self.tally = counts;
    }

    /// Install snapshot event history.
    ///
    /// The list is trusted to arrive newest first and is clamped to
    /// [`CAP_RECENT`]. Seeding does not touch the activity window, which
    /// only tracks live events.
    pub fn seed_classifications(&mut self, events: Vec<ClassificationEvent>) {
        let mut recent: VecDeque<ClassificationEvent> = events.into();
        recent.truncate(CAP_RECENT);
        self.recent = recent;
    }
}

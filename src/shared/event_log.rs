use bevy::prelude::*;
use std::collections::VecDeque;

use super::canvas_rect;

pub const LOG_VISIBLE_ROWS: usize = 5;
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Where the log panel sits on the canvas.
pub fn log_panel_rect() -> Rect {
    canvas_rect(270.0, 495.0, 510.0, 100.0)
}

/// Human-readable journal of what happened this session.
///
/// Oldest entries fall off once `capacity` is reached. The panel shows
/// `LOG_VISIBLE_ROWS` entries starting at `scroll`; every append snaps the
/// view back to the newest entries.
#[derive(Resource, Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<String>,
    capacity: usize,
    scroll: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(LOG_VISIBLE_ROWS);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            scroll: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("[Log] {}", message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
        self.scroll = self.max_scroll();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.entries.len().saturating_sub(LOG_VISIBLE_ROWS)
    }

    pub fn scroll_up(&mut self, step: usize) {
        self.scroll = self.scroll.saturating_sub(step);
    }

    pub fn scroll_down(&mut self, step: usize) {
        self.scroll = (self.scroll + step).min(self.max_scroll());
    }

    /// Entries currently inside the panel window.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .skip(self.scroll)
            .take(LOG_VISIBLE_ROWS)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_snaps_to_newest() {
        let mut log = EventLog::default();
        for i in 0..8 {
            log.push(format!("entry {i}"));
        }
        let visible: Vec<&str> = log.visible().collect();
        assert_eq!(visible, ["entry 3", "entry 4", "entry 5", "entry 6", "entry 7"]);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut log = EventLog::default();
        for i in 0..8 {
            log.push(format!("entry {i}"));
        }
        log.scroll_up(10);
        assert_eq!(log.scroll(), 0);
        assert_eq!(log.visible().next(), Some("entry 0"));
        log.scroll_down(10);
        assert_eq!(log.scroll(), 3);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = EventLog::with_capacity(6);
        for i in 0..10 {
            log.push(format!("entry {i}"));
        }
        assert_eq!(log.len(), 6);
        assert_eq!(log.entries().next(), Some("entry 4"));
        assert_eq!(log.last(), Some("entry 9"));
    }

    #[test]
    fn test_short_log_never_scrolls() {
        let mut log = EventLog::default();
        log.push("only");
        log.scroll_down(1);
        assert_eq!(log.scroll(), 0);
        assert_eq!(log.visible().count(), 1);
    }
}

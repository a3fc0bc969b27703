//! Mouse click tracking

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Default number of clicks kept in history
pub const DEFAULT_MOUSE_HISTORY: usize = 10;

/// Pointer button that produced a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [Self::Left, Self::Middle, Self::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

/// One click on the mouse test surface
#[derive(Debug, Clone, PartialEq)]
pub struct MouseClickEvent {
    pub button: MouseButton,
    /// Column relative to the test surface
    pub x: i32,
    /// Row relative to the test surface
    pub y: i32,
    pub timestamp: DateTime<Local>,
}

impl MouseClickEvent {
    pub fn new(button: MouseButton, x: i32, y: i32, timestamp: DateTime<Local>) -> Self {
        Self {
            button,
            x,
            y,
            timestamp,
        }
    }
}

/// Click counters and bounded history, newest first
#[derive(Debug, Clone)]
pub struct MouseStats {
    history: VecDeque<MouseClickEvent>,
    capacity: usize,
    total_clicks: u64,
}

impl MouseStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            total_clicks: 0,
        }
    }

    pub fn record(&mut self, click: MouseClickEvent) {
        self.total_clicks += 1;
        self.history.push_front(click);
        self.history.truncate(self.capacity);
    }

    pub fn last_click(&self) -> Option<&MouseClickEvent> {
        self.history.front()
    }

    /// Recent clicks, newest first
    pub fn history(&self) -> impl Iterator<Item = &MouseClickEvent> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Every click this session, including ones evicted from history
    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    /// Click count per button within the retained history
    pub fn count_by_button(&self, button: MouseButton) -> usize {
        self.history.iter().filter(|c| c.button == button).count()
    }

    /// `count_by_button` for every button, left to right
    pub fn recent_counts(&self) -> [(MouseButton, usize); 3] {
        MouseButton::ALL.map(|button| (button, self.count_by_button(button)))
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.total_clicks = 0;
    }
}

impl Default for MouseStats {
    fn default() -> Self {
        Self::new(DEFAULT_MOUSE_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::click;

    #[test]
    fn record_keeps_newest_first() {
        let mut stats = MouseStats::default();
        stats.record(click(MouseButton::Left, 1, 2, 0));
        stats.record(click(MouseButton::Right, 3, 4, 10));

        let buttons: Vec<MouseButton> = stats.history().map(|c| c.button).collect();
        assert_eq!(buttons, [MouseButton::Right, MouseButton::Left]);
        assert_eq!(stats.last_click().map(|c| (c.x, c.y)), Some((3, 4)));
    }

    #[test]
    fn history_is_bounded() {
        let mut stats = MouseStats::default();
        for i in 0..15 {
            stats.record(click(MouseButton::Left, i, 0, i as i64));
        }
        assert_eq!(stats.history_len(), DEFAULT_MOUSE_HISTORY);
        assert_eq!(stats.total_clicks(), 15);
        // oldest five evicted
        assert_eq!(stats.history().last().map(|c| c.x), Some(5));
    }

    #[test]
    fn count_by_button() {
        let mut stats = MouseStats::default();
        stats.record(click(MouseButton::Left, 0, 0, 0));
        stats.record(click(MouseButton::Middle, 0, 0, 1));
        stats.record(click(MouseButton::Left, 0, 0, 2));
        assert_eq!(stats.count_by_button(MouseButton::Left), 2);
        assert_eq!(stats.count_by_button(MouseButton::Middle), 1);
        assert_eq!(stats.count_by_button(MouseButton::Right), 0);
    }

    #[test]
    fn reset_clears_history_and_total() {
        let mut stats = MouseStats::default();
        stats.record(click(MouseButton::Left, 0, 0, 0));
        stats.reset();
        assert_eq!(stats.history_len(), 0);
        assert_eq!(stats.total_clicks(), 0);
        assert!(stats.last_click().is_none());
    }

    #[test]
    fn button_names() {
        assert_eq!(MouseButton::Left.name(), "left");
        assert_eq!(MouseButton::Middle.name(), "middle");
        assert_eq!(MouseButton::Right.name(), "right");
    }
}

//! Session-wide key statistics
//!
//! Counters are fed from the capture store's last event. Every captured press
//! carries a sequence number and is applied at most once, so calling
//! [`SessionStats::observe`] repeatedly with the same event is a no-op.

use crate::keyboard::{CapturedEvent, KeyCode, KeyEvent};
use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};

/// Default number of key events kept in history
pub const DEFAULT_KEY_HISTORY: usize = 12;

/// Aggregate key counters for one session
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Every key-down processed, repeats included
    total_presses: u64,
    /// Press count per physical code
    per_key_counts: HashMap<KeyCode, u64>,
    /// High-water mark of simultaneously held keys
    max_simultaneous: usize,
    /// Time of the first processed event
    first_interaction_at: Option<DateTime<Local>>,
    /// Recent events, newest first
    history: VecDeque<KeyEvent>,
    history_capacity: usize,
    /// Sequence number of the last applied event
    last_seq: Option<u64>,
}

impl SessionStats {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            total_presses: 0,
            per_key_counts: HashMap::new(),
            max_simultaneous: 0,
            first_interaction_at: None,
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
            last_seq: None,
        }
    }

    /// Apply a captured press given the pressed-key count at that moment.
    ///
    /// Returns `false` when the event was already applied.
    pub fn observe(&mut self, captured: &CapturedEvent, pressed_count: usize) -> bool {
        if self.last_seq.is_some_and(|seq| captured.seq <= seq) {
            return false;
        }
        self.last_seq = Some(captured.seq);

        let event = &captured.event;

        self.history.push_front(event.clone());
        self.history.truncate(self.history_capacity);

        self.max_simultaneous = self.max_simultaneous.max(pressed_count);
        self.total_presses += 1;
        *self.per_key_counts.entry(event.code.clone()).or_insert(0) += 1;

        if self.first_interaction_at.is_none() {
            self.first_interaction_at = Some(event.timestamp);
        }

        true
    }

    pub fn total_presses(&self) -> u64 {
        self.total_presses
    }

    pub fn max_simultaneous(&self) -> usize {
        self.max_simultaneous
    }

    pub fn first_interaction_at(&self) -> Option<DateTime<Local>> {
        self.first_interaction_at
    }

    pub fn press_count(&self, code: &str) -> u64 {
        self.per_key_counts.get(code).copied().unwrap_or(0)
    }

    pub fn per_key_counts(&self) -> &HashMap<KeyCode, u64> {
        &self.per_key_counts
    }

    /// Keys ordered by press count (highest first), ties by code
    pub fn keys_by_count(&self) -> Vec<(KeyCode, u64)> {
        let mut keys: Vec<(KeyCode, u64)> = self
            .per_key_counts
            .iter()
            .map(|(code, count)| (code.clone(), *count))
            .collect();
        keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        keys
    }

    /// Recent events, newest first
    pub fn history(&self) -> impl Iterator<Item = &KeyEvent> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Seconds since the first interaction, rounded, or `None` before any input
    pub fn duration_secs(&self, now: DateTime<Local>) -> Option<u64> {
        self.first_interaction_at.map(|first| {
            let ms = (now - first).num_milliseconds().max(0);
            ((ms + 500) / 1000) as u64
        })
    }

    /// Zero every counter. The sequence guard survives so stale events stay stale.
    pub fn reset(&mut self) {
        self.total_presses = 0;
        self.per_key_counts.clear();
        self.max_simultaneous = 0;
        self.first_interaction_at = None;
        self.history.clear();
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_HISTORY)
    }
}

//! One tester session: capture store, statistics, mouse and gaming state
//!
//! `Session` is the single owner of all mutable state. The front-end holds it
//! and feeds host events in delivery order; every derived counter is updated
//! synchronously before the call returns.

use crate::config::Config;
use crate::gaming::{ComboDefinition, GamingError, GamingMode, InputState, TestResult};
use crate::keyboard::{
    CaptureStore, HostAction, KeyCode, KeyEvent, KeyEventType, REFERENCE_KEY_COUNT,
};
use crate::mouse::{MouseClickEvent, MouseStats};
use crate::report::ReportSnapshot;
use crate::stats::SessionStats;
use chrono::{DateTime, Local};
use log::debug;
use std::collections::BTreeSet;

/// Current results of one gaming check
#[derive(Debug, Clone)]
pub struct LiveResults {
    pub name: &'static str,
    pub description: &'static str,
    pub results: Vec<TestResult>,
}

/// Live tester session
pub struct Session {
    config: Config,
    capture: CaptureStore,
    stats: SessionStats,
    mouse: MouseStats,
    gaming: GamingMode,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            capture: CaptureStore::new(),
            stats: SessionStats::new(config.history.key_history_capacity),
            mouse: MouseStats::new(config.history.mouse_history_capacity),
            gaming: GamingMode::new(config.thresholds.clone()),
            config,
        }
    }

    /// Dispatch a key transition by direction
    pub fn handle_key(&mut self, kind: KeyEventType, event: KeyEvent) -> HostAction {
        match kind {
            KeyEventType::Press => self.key_down(event),
            KeyEventType::Release => {
                self.key_up(&event);
                HostAction::Default
            }
        }
    }

    /// Record a key-down and update every derived counter exactly once
    pub fn key_down(&mut self, event: KeyEvent) -> HostAction {
        let action = CaptureStore::host_action(&event.code);
        self.capture.on_key_down(event);
        self.sync_last_event();
        action
    }

    /// Record a key-up. Only the pressed set and combo evaluation change.
    pub fn key_up(&mut self, event: &KeyEvent) {
        self.capture.on_key_up(event);
        self.gaming.process(&InputState {
            pressed: self.capture.pressed_keys(),
            press: None,
            max_simultaneous: self.stats.max_simultaneous(),
        });
    }

    /// Apply the capture store's last event to the aggregators.
    ///
    /// Safe to call any number of times: an event already applied is skipped.
    pub fn sync_last_event(&mut self) {
        let Some(captured) = self.capture.last_event() else {
            return;
        };
        let pressed = self.capture.pressed_keys();

        if self.stats.observe(captured, pressed.len()) {
            self.gaming.process(&InputState {
                pressed,
                press: Some(captured),
                max_simultaneous: self.stats.max_simultaneous(),
            });
        }
    }

    pub fn mouse_click(&mut self, click: MouseClickEvent) {
        self.mouse.record(click);
    }

    pub fn set_gaming_active(&mut self, active: bool) {
        self.gaming.set_active(active, self.capture.pressed_keys());
    }

    /// Flip gaming mode, returning the new state
    pub fn toggle_gaming(&mut self) -> bool {
        self.gaming.toggle(self.capture.pressed_keys())
    }

    pub fn select_combo(&mut self, name: &str) -> Result<&'static ComboDefinition, GamingError> {
        self.gaming.select_combo(name, self.capture.pressed_keys())
    }

    pub fn next_combo(&mut self) -> &'static ComboDefinition {
        self.gaming.next_combo(self.capture.pressed_keys())
    }

    /// Zero everything. Calling it twice is the same as calling it once.
    pub fn reset(&mut self) {
        self.capture.reset();
        self.stats.reset();
        self.mouse.reset();
        self.gaming.reset();
        debug!("session reset");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capture(&self) -> &CaptureStore {
        &self.capture
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn mouse(&self) -> &MouseStats {
        &self.mouse
    }

    pub fn gaming(&self) -> &GamingMode {
        &self.gaming
    }

    pub fn pressed_keys(&self) -> &BTreeSet<KeyCode> {
        self.capture.pressed_keys()
    }

    /// Tested reference keys out of the full inventory
    pub fn coverage(&self) -> (usize, usize) {
        (self.capture.inventory_coverage(), REFERENCE_KEY_COUNT)
    }

    /// Labelled live results of every gaming check
    pub fn live_results(&self, now: DateTime<Local>) -> Vec<LiveResults> {
        self.gaming
            .tests()
            .iter()
            .map(|test| LiveResults {
                name: test.name(),
                description: test.description(),
                results: test.get_results(now),
            })
            .collect()
    }

    /// Owned copy of everything the report compiler needs
    pub fn snapshot(&self, now: DateTime<Local>) -> ReportSnapshot {
        ReportSnapshot::capture(self, now)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

//! Capture store: pressed/tested key sets and the last event

use super::{keymap, CapturedEvent, KeyCode, KeyEvent};
use std::collections::BTreeSet;

/// Whether the host should suppress its default handling of a key
///
/// Terminal front-ends have no host default to suppress and ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Let the host handle the key normally
    Default,
    /// The key would scroll the page or trigger host chrome
    PreventDefault,
}

/// Authoritative key state for one session
#[derive(Debug)]
pub struct CaptureStore {
    /// Keys currently held down
    pressed_keys: BTreeSet<KeyCode>,
    /// Keys seen down at least once
    tested_keys: BTreeSet<KeyCode>,
    /// Most recent key-down event
    last_event: Option<CapturedEvent>,
    /// Sequence number handed to the next key-down
    next_seq: u64,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self {
            pressed_keys: BTreeSet::new(),
            tested_keys: BTreeSet::new(),
            last_event: None,
            next_seq: 1,
        }
    }

    /// Record a key-down. Unknown codes are recorded verbatim.
    pub fn on_key_down(&mut self, event: KeyEvent) {
        self.pressed_keys.insert(event.code.clone());
        self.tested_keys.insert(event.code.clone());

        let seq = self.next_seq;
        self.next_seq = seq + 1;
        self.last_event = Some(CapturedEvent { seq, event });
    }

    /// Record a key-up. The tested set never shrinks.
    pub fn on_key_up(&mut self, event: &KeyEvent) {
        self.pressed_keys.remove(&event.code);
    }

    /// Host action for a key-down of `code`
    pub fn host_action(code: &KeyCode) -> HostAction {
        if keymap::suppresses_host_default(code.as_str()) {
            HostAction::PreventDefault
        } else {
            HostAction::Default
        }
    }

    pub fn pressed_keys(&self) -> &BTreeSet<KeyCode> {
        &self.pressed_keys
    }

    pub fn tested_keys(&self) -> &BTreeSet<KeyCode> {
        &self.tested_keys
    }

    pub fn last_event(&self) -> Option<&CapturedEvent> {
        self.last_event.as_ref()
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed_keys.contains(code)
    }

    pub fn is_tested(&self, code: &str) -> bool {
        self.tested_keys.contains(code)
    }

    /// Current rollover (simultaneous key count)
    pub fn simultaneous_count(&self) -> usize {
        self.pressed_keys.len()
    }

    /// Number of reference-inventory keys tested so far
    pub fn inventory_coverage(&self) -> usize {
        self.tested_keys
            .iter()
            .filter(|k| keymap::is_reference_key(k.as_str()))
            .count()
    }

    /// Clear both key sets and the last event.
    ///
    /// Sequence numbers keep increasing across resets.
    pub fn reset(&mut self) {
        self.pressed_keys.clear();
        self.tested_keys.clear();
        self.last_event = None;
    }
}

impl Default for CaptureStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared test utilities
//!
//! Event builders with explicit millisecond offsets from a fixed base time,
//! so timing heuristics behave the same on every run.

use crate::keyboard::{keymap, KeyEvent, KeyLocation};
use crate::mouse::{MouseButton, MouseClickEvent};
use chrono::{DateTime, Duration, Local, TimeZone};

/// Base time used by all helpers (2025-01-15 12:00:00 UTC)
pub const BASE_MILLIS: i64 = 1_736_942_400_000;

/// Timestamp `offset_ms` after the base time
pub fn at(offset_ms: i64) -> DateTime<Local> {
    let base = Local
        .timestamp_millis_opt(BASE_MILLIS)
        .single()
        .expect("base time is unambiguous");
    base + Duration::milliseconds(offset_ms)
}

fn key_event(code: &str, is_repeat: bool, offset_ms: i64) -> KeyEvent {
    let location = if code.ends_with("Left") && !code.starts_with("Arrow") {
        KeyLocation::Left
    } else if code.ends_with("Right") && !code.starts_with("Arrow") {
        KeyLocation::Right
    } else if code.starts_with("Numpad") {
        KeyLocation::Numpad
    } else {
        KeyLocation::Standard
    };
    KeyEvent::new(keymap::label_for(code), code, location, is_repeat, at(offset_ms))
}

/// Key-down, not an auto-repeat
pub fn down(code: &str, offset_ms: i64) -> KeyEvent {
    key_event(code, false, offset_ms)
}

/// Auto-repeat key-down
pub fn repeat(code: &str, offset_ms: i64) -> KeyEvent {
    key_event(code, true, offset_ms)
}

/// Key-up
pub fn up(code: &str, offset_ms: i64) -> KeyEvent {
    key_event(code, false, offset_ms)
}

pub fn click(button: MouseButton, x: i32, y: i32, offset_ms: i64) -> MouseClickEvent {
    MouseClickEvent::new(button, x, y, at(offset_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_relative_to_base() {
        assert_eq!((at(250) - at(0)).num_milliseconds(), 250);
    }

    #[test]
    fn down_sets_location_from_code() {
        assert_eq!(down("ShiftLeft", 0).location, KeyLocation::Left);
        assert_eq!(down("ControlRight", 0).location, KeyLocation::Right);
        assert_eq!(down("ArrowLeft", 0).location, KeyLocation::Standard);
        assert_eq!(down("Numpad5", 0).location, KeyLocation::Numpad);
    }

    #[test]
    fn repeat_is_flagged() {
        assert!(repeat("KeyA", 0).is_repeat);
        assert!(!down("KeyA", 0).is_repeat);
    }
}

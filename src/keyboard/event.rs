//! Keyboard event types

use chrono::{DateTime, Local};
use std::borrow::Borrow;
use std::fmt;

/// Physical key code, layout independent (`"KeyW"`, `"Space"`, `"ShiftLeft"`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for KeyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for KeyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which physical copy of a key produced the event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyLocation {
    #[default]
    Standard,
    Left,
    Right,
    Numpad,
}

impl KeyLocation {
    /// Map a DOM-style location number. Unknown values are treated as standard.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Numpad,
            _ => Self::Standard,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Numpad => 3,
        }
    }
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key went down (including auto-repeat)
    Press,
    /// Key came up
    Release,
}

/// One observed key transition
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// Logical character or key name
    pub key: String,
    /// Physical key position
    pub code: KeyCode,
    /// Left/right/numpad disambiguator
    pub location: KeyLocation,
    /// Auto-repeat generated by the OS while the key is held
    pub is_repeat: bool,
    /// When the host reported the transition
    pub timestamp: DateTime<Local>,
}

impl KeyEvent {
    pub fn new(
        key: impl Into<String>,
        code: impl Into<KeyCode>,
        location: KeyLocation,
        is_repeat: bool,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            location,
            is_repeat,
            timestamp,
        }
    }
}

/// A key-down event as recorded by the capture store.
///
/// `seq` increases by one for every recorded press, so downstream consumers
/// can process each press exactly once no matter how often they look at it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub seq: u64,
    pub event: KeyEvent,
}

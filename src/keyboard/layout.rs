//! Physical layout definitions for the keyboard visual
//!
//! ANSI and ISO differ only around Enter and left Shift: ISO moves the
//! backslash key next to Enter and adds `IntlBackslash` beside a shorter
//! left Shift.

use serde::{Deserialize, Serialize};

/// Physical keyboard layout variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayout {
    /// US ANSI layout
    #[default]
    Ansi,
    /// ISO layout (UK, DE, FR, ...) with the extra key left of Z
    Iso,
}

impl KeyboardLayout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ansi => "ANSI",
            Self::Iso => "ISO",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Ansi => Self::Iso,
            Self::Iso => Self::Ansi,
        }
    }
}

/// Key definition for rendering in the keyboard visual
#[derive(Debug, Clone, Copy)]
pub struct VisualKey {
    /// Label to display
    pub label: &'static str,
    /// Physical code
    pub code: &'static str,
    /// Width in character cells
    pub width: u16,
}

const fn key(label: &'static str, code: &'static str, width: u16) -> VisualKey {
    VisualKey { label, code, width }
}

const W: u16 = 4;

/// Main block rows (function row through the bottom row) for a layout
pub fn main_rows(layout: KeyboardLayout) -> [Vec<VisualKey>; 6] {
    let row_f = vec![
        key("Esc", "Escape", W),
        key("F1", "F1", W),
        key("F2", "F2", W),
        key("F3", "F3", W),
        key("F4", "F4", W),
        key("F5", "F5", W),
        key("F6", "F6", W),
        key("F7", "F7", W),
        key("F8", "F8", W),
        key("F9", "F9", W),
        key("F10", "F10", W),
        key("F11", "F11", W),
        key("F12", "F12", W),
    ];

    let row0 = vec![
        key("`", "Backquote", W),
        key("1", "Digit1", W),
        key("2", "Digit2", W),
        key("3", "Digit3", W),
        key("4", "Digit4", W),
        key("5", "Digit5", W),
        key("6", "Digit6", W),
        key("7", "Digit7", W),
        key("8", "Digit8", W),
        key("9", "Digit9", W),
        key("0", "Digit0", W),
        key("-", "Minus", W),
        key("=", "Equal", W),
        key("\u{2190}", "Backspace", W + 2), // ←
    ];

    let mut row1 = vec![
        key("\u{21E5}", "Tab", W), // ⇥
        key("Q", "KeyQ", W),
        key("W", "KeyW", W),
        key("E", "KeyE", W),
        key("R", "KeyR", W),
        key("T", "KeyT", W),
        key("Y", "KeyY", W),
        key("U", "KeyU", W),
        key("I", "KeyI", W),
        key("O", "KeyO", W),
        key("P", "KeyP", W),
        key("[", "BracketLeft", W),
        key("]", "BracketRight", W),
    ];
    if layout == KeyboardLayout::Ansi {
        row1.push(key("\\", "Backslash", W));
    }

    let mut row2 = vec![
        key("\u{21EA}", "CapsLock", W + 1), // ⇪
        key("A", "KeyA", W),
        key("S", "KeyS", W),
        key("D", "KeyD", W),
        key("F", "KeyF", W),
        key("G", "KeyG", W),
        key("H", "KeyH", W),
        key("J", "KeyJ", W),
        key("K", "KeyK", W),
        key("L", "KeyL", W),
        key(";", "Semicolon", W),
        key("'", "Quote", W),
    ];
    if layout == KeyboardLayout::Iso {
        row2.push(key("#", "Backslash", W));
    }
    row2.push(key("\u{21B5}", "Enter", W + 2)); // ↵

    let mut row3 = Vec::with_capacity(13);
    match layout {
        KeyboardLayout::Iso => {
            row3.push(key("\u{21E7}", "ShiftLeft", W)); // ⇧
            row3.push(key("\\", "IntlBackslash", W));
        }
        KeyboardLayout::Ansi => row3.push(key("\u{21E7}", "ShiftLeft", W + 2)),
    }
    row3.extend([
        key("Z", "KeyZ", W),
        key("X", "KeyX", W),
        key("C", "KeyC", W),
        key("V", "KeyV", W),
        key("B", "KeyB", W),
        key("N", "KeyN", W),
        key("M", "KeyM", W),
        key(",", "Comma", W),
        key(".", "Period", W),
        key("/", "Slash", W),
        key("\u{21E7}", "ShiftRight", W + 3),
    ]);

    let row4 = vec![
        key("Ctl", "ControlLeft", W),
        key("\u{25C6}", "MetaLeft", W), // ◆
        key("Alt", "AltLeft", W),
        key("\u{2500}\u{2500}\u{2500}\u{2500}", "Space", (W + 1) * 6 - 1),
        key("Alt", "AltRight", W),
        key("\u{25C6}", "MetaRight", W),
        key("Mnu", "ContextMenu", W),
        key("Ctl", "ControlRight", W),
    ];

    [row_f, row0, row1, row2, row3, row4]
}

/// Navigation cluster and arrows, aligned to the main block rows.
///
/// Empty `code` marks a spacer.
pub fn nav_rows() -> [Vec<VisualKey>; 6] {
    [
        vec![key("Prt", "PrintScreen", W), key("Scr", "ScrollLock", W), key("Pse", "Pause", W)],
        vec![key("Ins", "Insert", W), key("Hom", "Home", W), key("PgU", "PageUp", W)],
        vec![key("Del", "Delete", W), key("End", "End", W), key("PgD", "PageDown", W)],
        Vec::new(),
        vec![key("", "", W), key("\u{25B2}", "ArrowUp", W), key("", "", W)],
        vec![
            key("\u{25C0}", "ArrowLeft", W),
            key("\u{25BC}", "ArrowDown", W),
            key("\u{25B6}", "ArrowRight", W),
        ],
    ]
}

/// Numpad block, aligned to the main block rows starting at the number row
pub fn numpad_rows() -> [Vec<VisualKey>; 5] {
    [
        vec![
            key("Num", "NumLock", W),
            key("/", "NumpadDivide", W),
            key("*", "NumpadMultiply", W),
            key("-", "NumpadSubtract", W),
        ],
        vec![
            key("7", "Numpad7", W),
            key("8", "Numpad8", W),
            key("9", "Numpad9", W),
            key("+", "NumpadAdd", W),
        ],
        vec![key("4", "Numpad4", W), key("5", "Numpad5", W), key("6", "Numpad6", W)],
        vec![
            key("1", "Numpad1", W),
            key("2", "Numpad2", W),
            key("3", "Numpad3", W),
            key("\u{21B5}", "NumpadEnter", W),
        ],
        vec![key("0", "Numpad0", W * 2 + 1), key(".", "NumpadDecimal", W)],
    ]
}

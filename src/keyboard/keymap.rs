//! Reference key inventory and per-code display info

use std::collections::HashMap;
use std::sync::LazyLock;

/// Size of the reference key inventory used for coverage display
pub const REFERENCE_KEY_COUNT: usize = 104;

/// Block of the keyboard a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGroup {
    Function,
    Main,
    Modifier,
    Navigation,
    Numpad,
}

/// Static information about a physical key
#[derive(Debug, Clone, Copy)]
pub struct KeyInfo {
    /// Physical code (`"KeyW"`)
    pub code: &'static str,
    /// Short label for display (`"W"`)
    pub label: &'static str,
    pub group: KeyGroup,
}

impl KeyInfo {
    const fn new(code: &'static str, label: &'static str, group: KeyGroup) -> Self {
        Self { code, label, group }
    }
}

use KeyGroup::{Function as Func, Main, Modifier as Md, Navigation as Nav, Numpad as Np};

/// Full-size ANSI board: main block, navigation cluster, arrows and numpad
pub static REFERENCE_KEYS: [KeyInfo; REFERENCE_KEY_COUNT] = [
    // Function row
    KeyInfo::new("Escape", "Esc", Func),
    KeyInfo::new("F1", "F1", Func),
    KeyInfo::new("F2", "F2", Func),
    KeyInfo::new("F3", "F3", Func),
    KeyInfo::new("F4", "F4", Func),
    KeyInfo::new("F5", "F5", Func),
    KeyInfo::new("F6", "F6", Func),
    KeyInfo::new("F7", "F7", Func),
    KeyInfo::new("F8", "F8", Func),
    KeyInfo::new("F9", "F9", Func),
    KeyInfo::new("F10", "F10", Func),
    KeyInfo::new("F11", "F11", Func),
    KeyInfo::new("F12", "F12", Func),
    // Number row
    KeyInfo::new("Backquote", "`", Main),
    KeyInfo::new("Digit1", "1", Main),
    KeyInfo::new("Digit2", "2", Main),
    KeyInfo::new("Digit3", "3", Main),
    KeyInfo::new("Digit4", "4", Main),
    KeyInfo::new("Digit5", "5", Main),
    KeyInfo::new("Digit6", "6", Main),
    KeyInfo::new("Digit7", "7", Main),
    KeyInfo::new("Digit8", "8", Main),
    KeyInfo::new("Digit9", "9", Main),
    KeyInfo::new("Digit0", "0", Main),
    KeyInfo::new("Minus", "-", Main),
    KeyInfo::new("Equal", "=", Main),
    KeyInfo::new("Backspace", "Bksp", Main),
    // Top letter row
    KeyInfo::new("Tab", "Tab", Main),
    KeyInfo::new("KeyQ", "Q", Main),
    KeyInfo::new("KeyW", "W", Main),
    KeyInfo::new("KeyE", "E", Main),
    KeyInfo::new("KeyR", "R", Main),
    KeyInfo::new("KeyT", "T", Main),
    KeyInfo::new("KeyY", "Y", Main),
    KeyInfo::new("KeyU", "U", Main),
    KeyInfo::new("KeyI", "I", Main),
    KeyInfo::new("KeyO", "O", Main),
    KeyInfo::new("KeyP", "P", Main),
    KeyInfo::new("BracketLeft", "[", Main),
    KeyInfo::new("BracketRight", "]", Main),
    KeyInfo::new("Backslash", "\\", Main),
    // Home row
    KeyInfo::new("CapsLock", "Caps", Md),
    KeyInfo::new("KeyA", "A", Main),
    KeyInfo::new("KeyS", "S", Main),
    KeyInfo::new("KeyD", "D", Main),
    KeyInfo::new("KeyF", "F", Main),
    KeyInfo::new("KeyG", "G", Main),
    KeyInfo::new("KeyH", "H", Main),
    KeyInfo::new("KeyJ", "J", Main),
    KeyInfo::new("KeyK", "K", Main),
    KeyInfo::new("KeyL", "L", Main),
    KeyInfo::new("Semicolon", ";", Main),
    KeyInfo::new("Quote", "'", Main),
    KeyInfo::new("Enter", "Enter", Main),
    // Bottom letter row
    KeyInfo::new("ShiftLeft", "Shift", Md),
    KeyInfo::new("KeyZ", "Z", Main),
    KeyInfo::new("KeyX", "X", Main),
    KeyInfo::new("KeyC", "C", Main),
    KeyInfo::new("KeyV", "V", Main),
    KeyInfo::new("KeyB", "B", Main),
    KeyInfo::new("KeyN", "N", Main),
    KeyInfo::new("KeyM", "M", Main),
    KeyInfo::new("Comma", ",", Main),
    KeyInfo::new("Period", ".", Main),
    KeyInfo::new("Slash", "/", Main),
    KeyInfo::new("ShiftRight", "Shift", Md),
    // Bottom row
    KeyInfo::new("ControlLeft", "Ctrl", Md),
    KeyInfo::new("MetaLeft", "Win", Md),
    KeyInfo::new("AltLeft", "Alt", Md),
    KeyInfo::new("Space", "Space", Main),
    KeyInfo::new("AltRight", "Alt", Md),
    KeyInfo::new("MetaRight", "Win", Md),
    KeyInfo::new("ContextMenu", "Menu", Md),
    KeyInfo::new("ControlRight", "Ctrl", Md),
    // Navigation cluster
    KeyInfo::new("PrintScreen", "Prt", Nav),
    KeyInfo::new("ScrollLock", "Scr", Nav),
    KeyInfo::new("Pause", "Pause", Nav),
    KeyInfo::new("Insert", "Ins", Nav),
    KeyInfo::new("Home", "Home", Nav),
    KeyInfo::new("PageUp", "PgUp", Nav),
    KeyInfo::new("Delete", "Del", Nav),
    KeyInfo::new("End", "End", Nav),
    KeyInfo::new("PageDown", "PgDn", Nav),
    KeyInfo::new("ArrowUp", "↑", Nav),
    KeyInfo::new("ArrowLeft", "←", Nav),
    KeyInfo::new("ArrowDown", "↓", Nav),
    KeyInfo::new("ArrowRight", "→", Nav),
    // Numpad
    KeyInfo::new("NumLock", "Num", Np),
    KeyInfo::new("NumpadDivide", "/", Np),
    KeyInfo::new("NumpadMultiply", "*", Np),
    KeyInfo::new("NumpadSubtract", "-", Np),
    KeyInfo::new("Numpad7", "7", Np),
    KeyInfo::new("Numpad8", "8", Np),
    KeyInfo::new("Numpad9", "9", Np),
    KeyInfo::new("NumpadAdd", "+", Np),
    KeyInfo::new("Numpad4", "4", Np),
    KeyInfo::new("Numpad5", "5", Np),
    KeyInfo::new("Numpad6", "6", Np),
    KeyInfo::new("Numpad1", "1", Np),
    KeyInfo::new("Numpad2", "2", Np),
    KeyInfo::new("Numpad3", "3", Np),
    KeyInfo::new("NumpadEnter", "Enter", Np),
    KeyInfo::new("Numpad0", "0", Np),
    KeyInfo::new("NumpadDecimal", ".", Np),
];

/// Lookup table over the reference inventory
pub static KEYMAP: LazyLock<HashMap<&'static str, KeyInfo>> =
    LazyLock::new(|| REFERENCE_KEYS.iter().map(|info| (info.code, *info)).collect());

/// Keys whose default host behavior (scrolling, browser chrome) gets in the way
const HOST_RESERVED: &[&str] = &[
    "Space",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "PageUp",
    "PageDown",
];

/// Modifier keys show their macOS symbols when built for macOS
pub const MAC_LABELS: bool = cfg!(target_os = "macos");

/// macOS symbol for a modifier code
pub fn mac_label(code: &str) -> Option<&'static str> {
    match code {
        "ControlLeft" | "ControlRight" => Some("\u{2303}"), // ⌃
        "MetaLeft" | "MetaRight" => Some("\u{2318}"),       // ⌘
        "AltLeft" | "AltRight" => Some("\u{2325}"),         // ⌥
        _ => None,
    }
}

fn label_with(code: &str, mac: bool) -> &str {
    if let Some(label) = mac.then(|| mac_label(code)).flatten() {
        return label;
    }
    KEYMAP.get(code).map(|info| info.label).unwrap_or(code)
}

/// Display label for a code, falling back to the code itself
pub fn label_for(code: &str) -> &str {
    label_with(code, MAC_LABELS)
}

pub fn is_reference_key(code: &str) -> bool {
    KEYMAP.contains_key(code)
}

/// Whether a key-down for `code` should have the host default suppressed
pub fn suppresses_host_default(code: &str) -> bool {
    if HOST_RESERVED.contains(&code) {
        return true;
    }
    // F1..F12
    code.strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=12).contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn inventory_has_104_unique_codes() {
        let codes: HashSet<&str> = REFERENCE_KEYS.iter().map(|k| k.code).collect();
        assert_eq!(codes.len(), REFERENCE_KEY_COUNT);
        assert_eq!(KEYMAP.len(), REFERENCE_KEY_COUNT);
    }

    #[test]
    fn inventory_group_sizes() {
        let count = |g: KeyGroup| REFERENCE_KEYS.iter().filter(|k| k.group == g).count();
        assert_eq!(count(KeyGroup::Function), 13);
        assert_eq!(count(KeyGroup::Numpad), 17);
        assert_eq!(count(KeyGroup::Navigation), 13);
    }

    #[test]
    fn labels_fall_back_to_code() {
        assert_eq!(label_for("KeyW"), "W");
        assert_eq!(label_for("ShiftLeft"), "Shift");
        assert_eq!(label_for("IntlRo"), "IntlRo");
    }

    #[test]
    fn host_default_suppression() {
        for code in ["Space", "ArrowUp", "ArrowDown", "PageUp", "PageDown", "F1", "F12"] {
            assert!(suppresses_host_default(code), "{code} should be suppressed");
        }
        for code in ["KeyF", "F13", "F0", "Enter", "Home", "Fn"] {
            assert!(!suppresses_host_default(code), "{code} should pass through");
        }
    }

    #[test]
    fn mac_labels_replace_modifiers_only() {
        assert_eq!(label_with("MetaLeft", true), "\u{2318}");
        assert_eq!(label_with("AltRight", true), "\u{2325}");
        assert_eq!(label_with("ControlLeft", true), "\u{2303}");
        assert_eq!(label_with("ShiftLeft", true), "Shift");
        assert_eq!(label_with("KeyQ", true), "Q");
        assert_eq!(label_with("MetaLeft", false), "Win");
        assert_eq!(label_with("AltLeft", false), "Alt");
        assert!(mac_label("ContextMenu").is_none());
    }

    #[test]
    fn label_for_follows_target_os() {
        let expected = if cfg!(target_os = "macos") { "\u{2318}" } else { "Win" };
        assert_eq!(label_for("MetaRight"), expected);
    }
}

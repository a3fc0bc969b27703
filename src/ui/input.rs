//! Terminal input adapter
//!
//! Converts crossterm key and mouse events into the crate's own event types
//! at the boundary, so nothing past this module sees crossterm shapes.

use crate::keyboard::{keymap, KeyEvent, KeyEventType, KeyLocation};
use crate::mouse::{MouseButton, MouseClickEvent};
use chrono::{DateTime, Local};
use crossterm::event::{
    KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
    ModifierKeyCode, MouseButton as CtMouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// Application commands, issued with Alt+letter so they never collide with
/// the combo presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reset,
    ToggleGaming,
    NextCombo,
    Export,
    Share,
    NextView,
    PrevView,
    ToggleLayout,
    ScrollUp,
    ScrollDown,
}

/// Recognise an application command. Ctrl+C always quits.
pub fn command_for(event: &CtKeyEvent) -> Option<Command> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == CtKeyCode::Char('c') {
        return Some(Command::Quit);
    }
    if !event.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let command = match event.code {
        CtKeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Command::Quit,
            'r' => Command::Reset,
            'g' => Command::ToggleGaming,
            'n' => Command::NextCombo,
            'e' => Command::Export,
            's' => Command::Share,
            'v' => Command::NextView,
            'b' => Command::PrevView,
            'l' => Command::ToggleLayout,
            _ => return None,
        },
        CtKeyCode::Up => Command::ScrollUp,
        CtKeyCode::Down => Command::ScrollDown,
        _ => return None,
    };
    Some(command)
}

/// Physical code for a character key, independent of shift state
fn char_code(c: char) -> Option<String> {
    let code = match c {
        'a'..='z' | 'A'..='Z' => format!("Key{}", c.to_ascii_uppercase()),
        '0'..='9' => format!("Digit{}", c),
        ' ' => "Space".to_string(),
        '!' => "Digit1".to_string(),
        '@' => "Digit2".to_string(),
        '#' => "Digit3".to_string(),
        '$' => "Digit4".to_string(),
        '%' => "Digit5".to_string(),
        '^' => "Digit6".to_string(),
        '&' => "Digit7".to_string(),
        '*' => "Digit8".to_string(),
        '(' => "Digit9".to_string(),
        ')' => "Digit0".to_string(),
        '-' | '_' => "Minus".to_string(),
        '=' | '+' => "Equal".to_string(),
        '[' | '{' => "BracketLeft".to_string(),
        ']' | '}' => "BracketRight".to_string(),
        '\\' | '|' => "Backslash".to_string(),
        ';' | ':' => "Semicolon".to_string(),
        '\'' | '"' => "Quote".to_string(),
        '`' | '~' => "Backquote".to_string(),
        ',' | '<' => "Comma".to_string(),
        '.' | '>' => "Period".to_string(),
        '/' | '?' => "Slash".to_string(),
        _ => return None,
    };
    Some(code)
}

/// Physical code for a keypad key
fn keypad_code(code: CtKeyCode) -> Option<&'static str> {
    let code = match code {
        CtKeyCode::Char('0') | CtKeyCode::Insert => "Numpad0",
        CtKeyCode::Char('1') | CtKeyCode::End => "Numpad1",
        CtKeyCode::Char('2') | CtKeyCode::Down => "Numpad2",
        CtKeyCode::Char('3') | CtKeyCode::PageDown => "Numpad3",
        CtKeyCode::Char('4') | CtKeyCode::Left => "Numpad4",
        CtKeyCode::Char('5') | CtKeyCode::KeypadBegin => "Numpad5",
        CtKeyCode::Char('6') | CtKeyCode::Right => "Numpad6",
        CtKeyCode::Char('7') | CtKeyCode::Home => "Numpad7",
        CtKeyCode::Char('8') | CtKeyCode::Up => "Numpad8",
        CtKeyCode::Char('9') | CtKeyCode::PageUp => "Numpad9",
        CtKeyCode::Char('.') | CtKeyCode::Delete => "NumpadDecimal",
        CtKeyCode::Char('+') => "NumpadAdd",
        CtKeyCode::Char('-') => "NumpadSubtract",
        CtKeyCode::Char('*') => "NumpadMultiply",
        CtKeyCode::Char('/') => "NumpadDivide",
        CtKeyCode::Enter => "NumpadEnter",
        _ => return None,
    };
    Some(code)
}

fn modifier_code(code: ModifierKeyCode) -> Option<&'static str> {
    let code = match code {
        ModifierKeyCode::LeftShift => "ShiftLeft",
        ModifierKeyCode::RightShift => "ShiftRight",
        ModifierKeyCode::LeftControl => "ControlLeft",
        ModifierKeyCode::RightControl => "ControlRight",
        ModifierKeyCode::LeftAlt => "AltLeft",
        ModifierKeyCode::RightAlt => "AltRight",
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => "MetaLeft",
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => "MetaRight",
        _ => return None,
    };
    Some(code)
}

/// Physical code for a terminal key. Keys with no physical counterpart
/// (media keys, hyper) map to `None`.
pub fn physical_code(event: &CtKeyEvent) -> Option<String> {
    if event.state.contains(KeyEventState::KEYPAD) {
        if let Some(code) = keypad_code(event.code) {
            return Some(code.to_string());
        }
    }

    let code = match event.code {
        CtKeyCode::Char(c) => return char_code(c),
        CtKeyCode::F(n) => return Some(format!("F{}", n)),
        CtKeyCode::Modifier(m) => return modifier_code(m).map(str::to_string),
        CtKeyCode::Backspace => "Backspace",
        CtKeyCode::Enter => "Enter",
        CtKeyCode::Left => "ArrowLeft",
        CtKeyCode::Right => "ArrowRight",
        CtKeyCode::Up => "ArrowUp",
        CtKeyCode::Down => "ArrowDown",
        CtKeyCode::Home => "Home",
        CtKeyCode::End => "End",
        CtKeyCode::PageUp => "PageUp",
        CtKeyCode::PageDown => "PageDown",
        CtKeyCode::Tab | CtKeyCode::BackTab => "Tab",
        CtKeyCode::Delete => "Delete",
        CtKeyCode::Insert => "Insert",
        CtKeyCode::Esc => "Escape",
        CtKeyCode::CapsLock => "CapsLock",
        CtKeyCode::ScrollLock => "ScrollLock",
        CtKeyCode::NumLock => "NumLock",
        CtKeyCode::PrintScreen => "PrintScreen",
        CtKeyCode::Pause => "Pause",
        CtKeyCode::Menu => "ContextMenu",
        CtKeyCode::KeypadBegin => "Numpad5",
        _ => return None,
    };
    Some(code.to_string())
}

fn location_for(code: &str) -> KeyLocation {
    if code.starts_with("Numpad") {
        KeyLocation::Numpad
    } else if code.starts_with("Arrow") {
        KeyLocation::Standard
    } else if code.ends_with("Left") {
        KeyLocation::Left
    } else if code.ends_with("Right") {
        KeyLocation::Right
    } else {
        KeyLocation::Standard
    }
}

/// Convert a terminal key event into a key transition
pub fn key_transition(
    event: &CtKeyEvent,
    timestamp: DateTime<Local>,
) -> Option<(KeyEventType, KeyEvent)> {
    let code = physical_code(event)?;
    let (kind, is_repeat) = match event.kind {
        KeyEventKind::Press => (KeyEventType::Press, false),
        KeyEventKind::Repeat => (KeyEventType::Press, true),
        KeyEventKind::Release => (KeyEventType::Release, false),
    };

    let key = match event.code {
        CtKeyCode::Char(c) => c.to_string(),
        _ => keymap::label_for(&code).to_string(),
    };
    let location = location_for(&code);

    Some((kind, KeyEvent::new(key, code, location, is_repeat, timestamp)))
}

/// Convert a terminal mouse event into a click on `surface`.
///
/// Only button-down events inside the surface count; coordinates are
/// relative to its top-left corner.
pub fn mouse_click(
    event: &MouseEvent,
    surface: Rect,
    timestamp: DateTime<Local>,
) -> Option<MouseClickEvent> {
    let MouseEventKind::Down(button) = event.kind else {
        return None;
    };
    let inside = event.column >= surface.x
        && event.column < surface.x + surface.width
        && event.row >= surface.y
        && event.row < surface.y + surface.height;
    if !inside {
        return None;
    }

    let button = match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Middle => MouseButton::Middle,
        CtMouseButton::Right => MouseButton::Right,
    };
    Some(MouseClickEvent::new(
        button,
        i32::from(event.column - surface.x),
        i32::from(event.row - surface.y),
        timestamp,
    ))
}

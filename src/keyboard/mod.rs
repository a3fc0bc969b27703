//! Keyboard event capture and key state

mod event;
mod state;
pub mod keymap;
pub mod layout;

pub use event::{CapturedEvent, KeyCode, KeyEvent, KeyEventType, KeyLocation};
pub use state::{CaptureStore, HostAction};
pub use keymap::REFERENCE_KEY_COUNT;
pub use layout::KeyboardLayout;

//! Best-effort summary delivery: share target first, clipboard second

use log::{info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for share and clipboard targets
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share target unavailable")]
    Unavailable,
    #[error("share cancelled by user")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Native share mechanism
pub trait ShareTarget {
    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError>;
}

/// Clipboard fallback
pub trait ClipboardTarget {
    fn copy_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// Where the summary ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// Both paths failed or were missing; nothing surfaced to the user
    Dropped,
}

/// Hand the summary to `share`, falling back to `clipboard`.
///
/// Never fails: a failure on both paths is logged and swallowed.
pub fn deliver_summary(
    title: &str,
    summary: &str,
    share: Option<&mut dyn ShareTarget>,
    clipboard: Option<&mut dyn ClipboardTarget>,
) -> ShareOutcome {
    if let Some(target) = share {
        match target.share(title, summary) {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => warn!("share failed, trying clipboard: {}", e),
        }
    }

    if let Some(target) = clipboard {
        match target.copy_text(summary) {
            Ok(()) => return ShareOutcome::Copied,
            Err(e) => warn!("clipboard copy failed: {}", e),
        }
    }

    ShareOutcome::Dropped
}

/// Share target that drops the summary into a directory as a text file
pub struct FileShare {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl FileShare {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    /// File written by the last successful share
    pub fn last_path(&self) -> Option<&PathBuf> {
        self.last_path.as_ref()
    }
}

impl ShareTarget for FileShare {
    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError> {
        if !self.dir.is_dir() {
            return Err(ShareError::Unavailable);
        }
        let path = self.dir.join("keyboard-test-summary.txt");
        fs::write(&path, format!("{}\n\n{}\n", title, text))?;
        info!("summary shared to {}", path.display());
        self.last_path = Some(path);
        Ok(())
    }
}

/// System clipboard, opened on first use and kept open afterwards
///
/// On X11 and Wayland the copied text is served by the open handle, so it
/// lives as long as this value does.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardTarget for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ShareError> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new()?);
        }
        let Some(clipboard) = self.handle.as_mut() else {
            return Err(ShareError::Unavailable);
        };
        clipboard.set_text(text)?;
        info!("summary copied to clipboard");
        Ok(())
    }
}

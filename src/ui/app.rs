//! Main application state and logic

use super::input::{command_for, key_transition, mouse_click, Command};
use super::theme::ThemeColors;
use crate::config::Config;
use crate::keyboard::{KeyEventType, KeyboardLayout};
use crate::report::{
    compile_document, compile_text_summary, deliver_summary, ClipboardTarget, ExportError,
    FileShare, ShareOutcome, SystemClipboard, SUMMARY_TITLE,
};
use crate::session::{LiveResults, Session};
use chrono::{DateTime, Local};
use crossterm::event::{KeyEvent as CtKeyEvent, MouseEvent};
use log::error;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::Instant;

/// Current view/tab in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Keyboard,
    Gaming,
    Report,
    Help,
}

impl AppView {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyboard => "Keyboard",
            Self::Gaming => "Gaming",
            Self::Report => "Report",
            Self::Help => "Help",
        }
    }

    pub fn all() -> &'static [AppView] {
        &[Self::Keyboard, Self::Gaming, Self::Report, Self::Help]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Keyboard => 0,
            Self::Gaming => 1,
            Self::Report => 2,
            Self::Help => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Keyboard,
            1 => Self::Gaming,
            2 => Self::Report,
            _ => Self::Help,
        }
    }
}

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Main application
pub struct App {
    /// Current view
    pub view: AppView,
    /// Application state
    pub state: AppState,
    /// The tester session
    pub session: Session,
    pub colors: ThemeColors,
    pub layout: KeyboardLayout,
    pub show_numpad: bool,
    /// Whether the terminal reports key releases. Without them every press
    /// is followed by a synthesized release.
    pub release_events: bool,
    /// Screen area that records mouse clicks, set while drawing
    pub mouse_surface: Rect,
    /// Scroll offset of the report preview
    pub report_scroll: u16,
    /// Directory that receives exports and shared summaries
    pub export_dir: PathBuf,
    /// Fallback when the summary cannot be written to `export_dir`
    pub clipboard: Box<dyn ClipboardTarget>,
    /// Application start time
    pub start_time: Instant,
    /// Last status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            view: AppView::Keyboard,
            state: AppState::Running,
            colors: ThemeColors::from_theme(config.ui.theme),
            layout: config.ui.layout,
            show_numpad: config.ui.show_numpad,
            release_events: true,
            mouse_surface: Rect::default(),
            report_scroll: 0,
            export_dir: PathBuf::from("."),
            clipboard: Box::new(SystemClipboard::new()),
            start_time: Instant::now(),
            status_message: None,
            status_time: None,
            session: Session::new(config),
        }
    }

    /// Route a terminal key event: commands first, everything else is recorded
    pub fn handle_key(&mut self, event: &CtKeyEvent, now: DateTime<Local>) {
        if let Some(command) = command_for(event) {
            self.run_command(command, now);
            return;
        }

        let Some((kind, key)) = key_transition(event, now) else {
            return;
        };
        // HostAction is meaningless in a terminal
        if self.release_events || kind == KeyEventType::Release {
            self.session.handle_key(kind, key);
        } else {
            self.session.key_down(key.clone());
            self.session.key_up(&key);
        }
    }

    /// Record a click if it lands on the mouse surface
    pub fn handle_mouse(&mut self, event: &MouseEvent, now: DateTime<Local>) {
        if let Some(click) = mouse_click(event, self.mouse_surface, now) {
            self.session.mouse_click(click);
        }
    }

    pub fn run_command(&mut self, command: Command, now: DateTime<Local>) {
        match command {
            Command::Quit => self.quit(),
            Command::Reset => self.reset(),
            Command::ToggleGaming => self.toggle_gaming(),
            Command::NextCombo => self.next_combo(),
            Command::Export => match self.export_report(now) {
                Ok(path) => self.set_status(format!("Exported to {}", path.display())),
                Err(e) => {
                    error!("report export failed: {}", e);
                    self.set_status(format!("Export failed: {}", e));
                }
            },
            Command::Share => {
                self.share_summary(now);
            }
            Command::NextView => self.next_view(),
            Command::PrevView => self.prev_view(),
            Command::ToggleLayout => {
                self.layout = self.layout.toggled();
                self.set_status(format!("Layout: {}", self.layout.name()));
            }
            Command::ScrollUp => self.report_scroll = self.report_scroll.saturating_sub(1),
            Command::ScrollDown => self.report_scroll = self.report_scroll.saturating_add(1),
        }
    }

    /// Switch to the next view
    pub fn next_view(&mut self) {
        let current = self.view.index();
        let next = (current + 1) % AppView::all().len();
        self.view = AppView::from_index(next);
    }

    /// Switch to the previous view
    pub fn prev_view(&mut self) {
        let current = self.view.index();
        let prev = if current == 0 {
            AppView::all().len() - 1
        } else {
            current - 1
        };
        self.view = AppView::from_index(prev);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.report_scroll = 0;
        self.set_status("Session reset".to_string());
    }

    pub fn toggle_gaming(&mut self) {
        let active = self.session.toggle_gaming();
        self.set_status(format!("Gaming mode {}", if active { "ON" } else { "OFF" }));
    }

    pub fn next_combo(&mut self) {
        let combo = self.session.next_combo();
        self.set_status(format!("Combo: {}", combo.name));
    }

    /// Write the paginated report as text and JSON. Returns the text file path.
    pub fn export_report(&mut self, now: DateTime<Local>) -> Result<PathBuf, ExportError> {
        let document = compile_document(&self.session.snapshot(now));

        let text_path = self.export_dir.join(document.file_name("txt"));
        document.export_text(&text_path)?;
        document.export_json(&self.export_dir.join(document.file_name("json")))?;
        Ok(text_path)
    }

    /// Share the text summary into the export directory, or copy it to the
    /// clipboard when that fails
    pub fn share_summary(&mut self, now: DateTime<Local>) -> ShareOutcome {
        let summary = compile_text_summary(&self.session.snapshot(now));
        let mut target = FileShare::new(&self.export_dir);
        let clipboard: &mut dyn ClipboardTarget = self.clipboard.as_mut();
        let outcome =
            deliver_summary(SUMMARY_TITLE, &summary, Some(&mut target), Some(clipboard));

        match (outcome, target.last_path()) {
            (ShareOutcome::Shared, Some(path)) => {
                self.set_status(format!("Summary shared to {}", path.display()))
            }
            (ShareOutcome::Copied, _) => self.set_status("Summary copied to clipboard".to_string()),
            _ => self.set_status("Summary could not be shared".to_string()),
        }
        outcome
    }

    /// Text rendering of the report for the preview view
    pub fn report_text(&self, now: DateTime<Local>) -> String {
        compile_document(&self.session.snapshot(now)).render_text()
    }

    /// Live gaming results, one panel per check
    pub fn gaming_results(&self, now: DateTime<Local>) -> Vec<LiveResults> {
        self.session.live_results(now)
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still valid (within 3 seconds)
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed().as_secs() < 3 => Some(msg),
            _ => None,
        }
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

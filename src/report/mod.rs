//! Session report compilation, export and sharing

mod document;
mod share;
mod summary;

pub use document::{compile_document, Block, Document, ExportError, Page, DOCUMENT_TITLE};
pub use share::{
    deliver_summary, ClipboardTarget, FileShare, ShareError, ShareOutcome, ShareTarget,
    SystemClipboard,
};
pub use summary::{compile_text_summary, SUMMARY_TITLE};

use crate::config::ReportConfig;
use crate::gaming::{ComboResult, ResponseStatus, RolloverTier};
use crate::keyboard::{KeyCode, KeyEvent};
use crate::mouse::MouseClickEvent;
use crate::session::Session;
use chrono::{DateTime, Local};

/// Response heuristic figures, present only when presses were recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    pub rapid_presses: u64,
    pub total_presses: u64,
    pub avg_response_ms: u64,
    pub status: ResponseStatus,
}

/// Owned copy of a session at one instant
///
/// Compiling a report from the same snapshot always gives the same output.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    /// Evaluation time for durations and averages
    pub now: DateTime<Local>,
    pub config: ReportConfig,
    pub total_presses: u64,
    pub unique_keys: usize,
    pub max_simultaneous: usize,
    pub current_pressed: Vec<KeyCode>,
    pub first_interaction_at: Option<DateTime<Local>>,
    pub duration_secs: Option<u64>,
    /// Per-key counts, highest first
    pub key_counts: Vec<(KeyCode, u64)>,
    /// Newest first
    pub key_history: Vec<KeyEvent>,
    pub total_clicks: u64,
    /// Newest first
    pub mouse_history: Vec<MouseClickEvent>,
    pub rollover_tier: RolloverTier,
    /// Combo name and latest result, in first-evaluated order
    pub combo_results: Vec<(String, ComboResult)>,
    pub response: Option<ResponseSnapshot>,
}

impl ReportSnapshot {
    pub(crate) fn capture(session: &Session, now: DateTime<Local>) -> Self {
        let stats = session.stats();
        let gaming = session.gaming();
        let response = gaming.response();

        let response = if response.total_presses() > 0 {
            Some(ResponseSnapshot {
                rapid_presses: response.rapid_press_count(),
                total_presses: response.total_presses(),
                avg_response_ms: response.avg_response_ms(now).unwrap_or(0),
                status: response.status(),
            })
        } else {
            None
        };

        Self {
            now,
            config: session.config().report.clone(),
            total_presses: stats.total_presses(),
            unique_keys: session.capture().tested_keys().len(),
            max_simultaneous: stats.max_simultaneous(),
            current_pressed: session.pressed_keys().iter().cloned().collect(),
            first_interaction_at: stats.first_interaction_at(),
            duration_secs: stats.duration_secs(now),
            key_counts: stats.keys_by_count(),
            key_history: stats.history().cloned().collect(),
            total_clicks: session.mouse().total_clicks(),
            mouse_history: session.mouse().history().cloned().collect(),
            rollover_tier: RolloverTier::classify(
                stats.max_simultaneous(),
                &session.config().thresholds,
            ),
            combo_results: gaming
                .combo()
                .results()
                .iter()
                .map(|(name, result)| (name.to_string(), result.clone()))
                .collect(),
            response,
        }
    }

    /// True before any key press or click
    pub fn is_empty(&self) -> bool {
        self.total_presses == 0 && self.total_clicks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mouse::MouseButton;
    use crate::test_helpers::{at, click, down};

    #[test]
    fn snapshot_is_detached_from_session() {
        let mut session = Session::default();
        session.key_down(down("KeyA", 0));
        let snapshot = session.snapshot(at(1_000));

        session.key_down(down("KeyB", 10));
        session.reset();

        assert_eq!(snapshot.total_presses, 1);
        assert_eq!(snapshot.unique_keys, 1);
        assert_eq!(snapshot.duration_secs, Some(1));
        assert_eq!(snapshot.current_pressed.len(), 1);
    }

    #[test]
    fn response_only_after_gaming_presses() {
        let mut session = Session::default();
        session.key_down(down("KeyA", 0));
        assert!(session.snapshot(at(100)).response.is_none());

        session.set_gaming_active(true);
        session.key_down(down("KeyS", 200));
        session.key_down(down("KeyD", 250));
        let response = session.snapshot(at(400)).response.expect("presses recorded");
        assert_eq!(response.total_presses, 2);
        assert_eq!(response.rapid_presses, 1);
        assert_eq!(response.avg_response_ms, 100);
        assert_eq!(response.status, ResponseStatus::Testing);
    }

    #[test]
    fn empty_snapshot() {
        let session = Session::default();
        let snapshot = session.snapshot(at(0));
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.rollover_tier, RolloverTier::Limited);

        let mut session = Session::default();
        session.mouse_click(click(MouseButton::Right, 0, 0, 0));
        assert!(!session.snapshot(at(0)).is_empty());
    }
}

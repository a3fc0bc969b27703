//! Gaming-mode checks: combo validation, rapid-press response, rollover tier

mod combo;
mod response;
mod rollover;

pub use combo::{find_combo, ComboDefinition, ComboResult, ComboTest, COMBO_PRESETS};
pub use response::{ResponseStatus, ResponseTimeTest};
pub use rollover::{RolloverTest, RolloverTier};

use crate::config::GamingConfig;
use crate::keyboard::{CapturedEvent, KeyCode};
use chrono::{DateTime, Local};
use log::debug;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised by gaming-mode operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GamingError {
    #[error("unknown combo preset: {0}")]
    UnknownCombo(String),
}

/// Input snapshot handed to every gaming check after a key transition
#[derive(Debug, Clone, Copy)]
pub struct InputState<'a> {
    /// Keys held right now
    pub pressed: &'a BTreeSet<KeyCode>,
    /// The press that caused this transition, `None` for releases
    pub press: Option<&'a CapturedEvent>,
    /// Session high-water mark of simultaneous keys
    pub max_simultaneous: usize,
}

/// Common trait for all gaming checks
pub trait GamingTest {
    /// Name of the check
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Process a key transition
    fn process(&mut self, input: &InputState<'_>);

    /// Get results as labelled entries
    fn get_results(&self, now: DateTime<Local>) -> Vec<TestResult>;

    /// Reset the check
    fn reset(&mut self);
}

/// A single result entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub label: String,
    pub value: String,
    pub status: ResultStatus,
}

impl TestResult {
    pub fn new(label: impl Into<String>, value: impl Into<String>, status: ResultStatus) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            status,
        }
    }

    pub fn ok(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Ok)
    }

    pub fn warning(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Warning)
    }

    pub fn error(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Error)
    }

    pub fn info(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Info)
    }
}

/// Status of a result entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Ok,
    Warning,
    Error,
    Info,
}

/// Gaming mode: the active flag plus the three checks
pub struct GamingMode {
    active: bool,
    combo: ComboTest,
    response: ResponseTimeTest,
    rollover: RolloverTest,
}

impl GamingMode {
    pub fn new(config: GamingConfig) -> Self {
        Self {
            active: false,
            combo: ComboTest::new(),
            response: ResponseTimeTest::new(config.clone()),
            rollover: RolloverTest::new(config),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switch gaming mode on or off.
    ///
    /// Either direction restarts response timing. Switching off drops the
    /// selected combo; recorded combo results stay until a full reset.
    pub fn set_active(&mut self, active: bool, pressed: &BTreeSet<KeyCode>) {
        self.active = active;
        self.response.reset();

        if active {
            self.combo.evaluate(pressed);
        } else {
            self.combo.clear_selection();
        }
        debug!("gaming mode {}", if active { "enabled" } else { "disabled" });
    }

    pub fn toggle(&mut self, pressed: &BTreeSet<KeyCode>) -> bool {
        self.set_active(!self.active, pressed);
        self.active
    }

    /// Select a combo preset. While active, it is evaluated right away.
    pub fn select_combo(
        &mut self,
        name: &str,
        pressed: &BTreeSet<KeyCode>,
    ) -> Result<&'static ComboDefinition, GamingError> {
        let combo = self.combo.select(name)?;
        if self.active {
            self.combo.evaluate(pressed);
        }
        debug!("combo selected: {}", combo.name);
        Ok(combo)
    }

    /// Select the preset after the current one, wrapping around
    pub fn next_combo(&mut self, pressed: &BTreeSet<KeyCode>) -> &'static ComboDefinition {
        let next = match self.combo.selected() {
            Some(current) => COMBO_PRESETS
                .iter()
                .position(|c| c.name == current.name)
                .map_or(0, |i| (i + 1) % COMBO_PRESETS.len()),
            None => 0,
        };
        let combo = &COMBO_PRESETS[next];
        self.combo.select_preset(combo);
        if self.active {
            self.combo.evaluate(pressed);
        }
        debug!("combo selected: {}", combo.name);
        combo
    }

    pub fn selected_combo(&self) -> Option<&'static ComboDefinition> {
        self.combo.selected()
    }

    /// Feed a key transition. Rollover always tracks; combo and response
    /// checks only run while gaming mode is active.
    pub fn process(&mut self, input: &InputState<'_>) {
        self.rollover.process(input);
        if self.active {
            self.combo.process(input);
            self.response.process(input);
        }
    }

    pub fn combo(&self) -> &ComboTest {
        &self.combo
    }

    pub fn response(&self) -> &ResponseTimeTest {
        &self.response
    }

    pub fn rollover(&self) -> &RolloverTest {
        &self.rollover
    }

    /// All checks, in display order
    pub fn tests(&self) -> [&dyn GamingTest; 3] {
        [&self.rollover, &self.combo, &self.response]
    }

    /// Back to the initial state: inactive, no selection, no results
    pub fn reset(&mut self) {
        self.active = false;
        self.combo.reset();
        self.response.reset();
        self.rollover.reset();
    }
}

impl Default for GamingMode {
    fn default() -> Self {
        Self::new(GamingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{at, down};

    fn held(codes: &[&str]) -> BTreeSet<KeyCode> {
        codes.iter().map(|c| KeyCode::from(*c)).collect()
    }

    fn press(mode: &mut GamingMode, pressed: &BTreeSet<KeyCode>, seq: u64, code: &str, ms: i64) {
        let captured = CapturedEvent {
            seq,
            event: down(code, ms),
        };
        mode.process(&InputState {
            pressed,
            press: Some(&captured),
            max_simultaneous: pressed.len(),
        });
    }

    #[test]
    fn inactive_mode_only_tracks_rollover() {
        let mut mode = GamingMode::default();
        let pressed = held(&["KeyA"]);
        press(&mut mode, &pressed, 1, "KeyA", 0);

        assert_eq!(mode.rollover().max_rollover(), 1);
        assert_eq!(mode.response().total_presses(), 0);
    }

    #[test]
    fn enabling_restarts_response_timing() {
        let mut mode = GamingMode::default();
        mode.set_active(true, &BTreeSet::new());
        press(&mut mode, &held(&["KeyA"]), 1, "KeyA", 0);
        press(&mut mode, &held(&["KeyS"]), 2, "KeyS", 20);
        assert_eq!(mode.response().rapid_press_count(), 1);

        mode.toggle(&BTreeSet::new());
        assert!(!mode.is_active());
        assert_eq!(mode.response().total_presses(), 0);

        mode.toggle(&BTreeSet::new());
        assert!(mode.is_active());
        assert_eq!(mode.response().total_presses(), 0);
        assert!(mode.response().start_time().is_none());
    }

    #[test]
    fn disabling_clears_selection_but_keeps_results() {
        let mut mode = GamingMode::default();
        let pressed = held(&["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"]);
        mode.set_active(true, &BTreeSet::new());
        mode.select_combo("Arrow Keys", &pressed).expect("known preset");

        mode.set_active(false, &BTreeSet::new());
        assert!(mode.selected_combo().is_none());
        assert!(mode.combo().result_for("Arrow Keys").is_some_and(|r| r.passed));
    }

    #[test]
    fn selecting_while_held_evaluates_immediately() {
        let mut mode = GamingMode::default();
        mode.set_active(true, &BTreeSet::new());
        let pressed = held(&["KeyW", "KeyA", "KeyS", "KeyD", "Space"]);
        mode.select_combo("WASD + Space", &pressed).expect("known preset");
        assert!(mode.combo().result_for("WASD + Space").is_some_and(|r| r.passed));
    }

    #[test]
    fn enabling_with_selection_evaluates() {
        let mut mode = GamingMode::default();
        mode.select_combo("Arrow Keys", &BTreeSet::new()).expect("known preset");
        assert!(mode.combo().results().is_empty());

        mode.set_active(true, &held(&["ArrowUp"]));
        assert!(mode.combo().result_for("Arrow Keys").is_some_and(|r| !r.passed));
    }

    #[test]
    fn unknown_combo_is_typed_error() {
        let mut mode = GamingMode::default();
        let err = mode.select_combo("Konami", &BTreeSet::new()).unwrap_err();
        assert_eq!(err, GamingError::UnknownCombo("Konami".to_string()));
        assert_eq!(err.to_string(), "unknown combo preset: Konami");
    }

    #[test]
    fn next_combo_wraps() {
        let mut mode = GamingMode::default();
        let empty = BTreeSet::new();
        assert_eq!(mode.next_combo(&empty).name, COMBO_PRESETS[0].name);
        for _ in 1..COMBO_PRESETS.len() {
            mode.next_combo(&empty);
        }
        assert_eq!(mode.selected_combo().map(|c| c.name), Some("Number Row"));
        assert_eq!(mode.next_combo(&empty).name, "WASD + Space");
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut mode = GamingMode::default();
        mode.set_active(true, &BTreeSet::new());
        mode.select_combo("Arrow Keys", &held(&["ArrowUp"])).expect("known preset");
        press(&mut mode, &held(&["ArrowUp"]), 1, "ArrowUp", 0);

        mode.reset();
        mode.reset();

        assert!(!mode.is_active());
        assert!(mode.selected_combo().is_none());
        assert!(mode.combo().results().is_empty());
        assert_eq!(mode.response().total_presses(), 0);
        assert_eq!(mode.rollover().max_rollover(), 0);
    }

    #[test]
    fn tests_listed_in_display_order() {
        let mode = GamingMode::default();
        let names: Vec<&str> = mode.tests().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            ["N-Key Rollover Test", "Gaming Combo Test", "Response Time Test"]
        );
        assert!(!mode.tests()[0].get_results(at(0)).is_empty());
    }
}

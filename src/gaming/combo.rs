//! Gaming combo validation
//!
//! A combo passes only on exact set equality: every expected key held and
//! nothing else. Holding the combo plus one unrelated key fails.

use super::{GamingError, GamingTest, InputState, ResultStatus, TestResult};
use crate::keyboard::{keymap, KeyCode};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;

/// A named set of keys expected to be held together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboDefinition {
    pub name: &'static str,
    /// Expected physical codes, in display order
    pub keys: &'static [&'static str],
}

/// Built-in combo presets
pub const COMBO_PRESETS: &[ComboDefinition] = &[
    ComboDefinition {
        name: "WASD + Space",
        keys: &["KeyW", "KeyA", "KeyS", "KeyD", "Space"],
    },
    ComboDefinition {
        name: "WASD + Shift",
        keys: &["KeyW", "KeyA", "KeyS", "KeyD", "ShiftLeft"],
    },
    ComboDefinition {
        name: "WASD + Space + Shift",
        keys: &["KeyW", "KeyA", "KeyS", "KeyD", "Space", "ShiftLeft"],
    },
    ComboDefinition {
        name: "WASD + Ctrl",
        keys: &["KeyW", "KeyA", "KeyS", "KeyD", "ControlLeft"],
    },
    ComboDefinition {
        name: "QWE + ASD",
        keys: &["KeyQ", "KeyW", "KeyE", "KeyA", "KeyS", "KeyD"],
    },
    ComboDefinition {
        name: "Arrow Keys",
        keys: &["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"],
    },
    ComboDefinition {
        name: "Number Row",
        keys: &["Digit1", "Digit2", "Digit3", "Digit4", "Digit5"],
    },
];

/// Look up a preset by name
pub fn find_combo(name: &str) -> Option<&'static ComboDefinition> {
    COMBO_PRESETS.iter().find(|c| c.name == name)
}

/// Outcome of the most recent evaluation of one combo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboResult {
    pub passed: bool,
    /// Expected codes, in preset order
    pub expected: Vec<KeyCode>,
    /// Keys held at evaluation time
    pub pressed: Vec<KeyCode>,
}

impl ComboResult {
    /// Evaluate `combo` against the currently held keys
    pub fn evaluate(combo: &ComboDefinition, pressed: &BTreeSet<KeyCode>) -> Self {
        let expected_set: BTreeSet<&str> = combo.keys.iter().copied().collect();
        let pressed_set: BTreeSet<&str> = pressed.iter().map(|k| k.as_str()).collect();

        Self {
            passed: expected_set == pressed_set,
            expected: combo.keys.iter().map(|k| KeyCode::from(*k)).collect(),
            pressed: pressed.iter().cloned().collect(),
        }
    }

    /// Expected keys not currently held
    pub fn missing(&self) -> Vec<&KeyCode> {
        self.expected
            .iter()
            .filter(|k| !self.pressed.contains(k))
            .collect()
    }

    /// Held keys that are not part of the combo
    pub fn extra(&self) -> Vec<&KeyCode> {
        self.pressed
            .iter()
            .filter(|k| !self.expected.contains(k))
            .collect()
    }
}

/// Join codes by their display labels
pub(crate) fn join_labels<'a>(codes: impl IntoIterator<Item = &'a KeyCode>) -> String {
    codes
        .into_iter()
        .map(|c| keymap::label_for(c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Combo test: the selected preset is re-evaluated on every key transition
pub struct ComboTest {
    selected: Option<&'static ComboDefinition>,
    /// Latest result per evaluated combo, in first-evaluated order
    results: Vec<(&'static str, ComboResult)>,
}

impl ComboTest {
    pub fn new() -> Self {
        Self {
            selected: None,
            results: Vec::new(),
        }
    }

    /// Select a preset by name. Unknown names leave the selection unchanged.
    pub fn select(&mut self, name: &str) -> Result<&'static ComboDefinition, GamingError> {
        let combo = find_combo(name).ok_or_else(|| GamingError::UnknownCombo(name.to_string()))?;
        self.select_preset(combo);
        Ok(combo)
    }

    pub fn select_preset(&mut self, combo: &'static ComboDefinition) {
        self.selected = Some(combo);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&'static ComboDefinition> {
        self.selected
    }

    /// Re-evaluate the selected combo against the held keys
    pub fn evaluate(&mut self, pressed: &BTreeSet<KeyCode>) -> Option<&ComboResult> {
        let combo = self.selected?;
        let result = ComboResult::evaluate(combo, pressed);

        let index = match self.results.iter().position(|(name, _)| *name == combo.name) {
            Some(index) => {
                self.results[index].1 = result;
                index
            }
            None => {
                self.results.push((combo.name, result));
                self.results.len() - 1
            }
        };
        Some(&self.results[index].1)
    }

    pub fn result_for(&self, name: &str) -> Option<&ComboResult> {
        self.results
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r)
    }

    /// Every combo evaluated this session with its latest result
    pub fn results(&self) -> &[(&'static str, ComboResult)] {
        &self.results
    }
}

impl Default for ComboTest {
    fn default() -> Self {
        Self::new()
    }
}

impl GamingTest for ComboTest {
    fn name(&self) -> &'static str {
        "Gaming Combo Test"
    }

    fn description(&self) -> &'static str {
        "Select a combo and hold all keys simultaneously"
    }

    fn process(&mut self, input: &InputState<'_>) {
        self.evaluate(input.pressed);
    }

    fn get_results(&self, _now: DateTime<Local>) -> Vec<TestResult> {
        let Some(combo) = self.selected else {
            return vec![TestResult::info("Combo", "None selected")];
        };

        let mut results = vec![TestResult::info("Combo", combo.name)];
        let Some(result) = self.result_for(combo.name) else {
            return results;
        };

        if result.passed {
            results.push(TestResult::ok("Result", "PASSED - all keys registered"));
        } else if result.pressed.is_empty() {
            results.push(TestResult::info("Result", "Hold the combo keys"));
        } else {
            results.push(TestResult::error("Result", "FAILED"));
        }

        results.push(TestResult::info("Expected", join_labels(&result.expected)));
        let pressed = if result.pressed.is_empty() {
            "None".to_string()
        } else {
            join_labels(&result.pressed)
        };
        results.push(TestResult::info("Pressed", pressed));

        let missing = result.missing();
        if !missing.is_empty() && !result.pressed.is_empty() {
            results.push(TestResult::warning("Missing", join_labels(missing)));
        }
        let extra = result.extra();
        if !extra.is_empty() {
            results.push(TestResult::new("Extra", join_labels(extra), ResultStatus::Warning));
        }

        results
    }

    fn reset(&mut self) {
        self.selected = None;
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::at;

    fn held(codes: &[&str]) -> BTreeSet<KeyCode> {
        codes.iter().map(|c| KeyCode::from(*c)).collect()
    }

    fn wasd_space() -> &'static ComboDefinition {
        find_combo("WASD + Space").expect("preset exists")
    }

    #[test]
    fn seven_presets() {
        assert_eq!(COMBO_PRESETS.len(), 7);
        assert!(find_combo("Arrow Keys").is_some());
        assert!(find_combo("Konami").is_none());
    }

    #[test]
    fn exact_match_passes() {
        let result = ComboResult::evaluate(wasd_space(), &held(&["KeyW", "KeyA", "KeyS", "KeyD", "Space"]));
        assert!(result.passed);
        assert!(result.missing().is_empty());
        assert!(result.extra().is_empty());
    }

    #[test]
    fn missing_key_fails() {
        let result = ComboResult::evaluate(wasd_space(), &held(&["KeyW", "KeyA", "KeyS", "KeyD"]));
        assert!(!result.passed);
        let missing: Vec<&str> = result.missing().iter().map(|k| k.as_str()).collect();
        assert_eq!(missing, ["Space"]);
    }

    #[test]
    fn extra_key_fails() {
        let result = ComboResult::evaluate(
            wasd_space(),
            &held(&["KeyW", "KeyA", "KeyS", "KeyD", "Space", "KeyQ"]),
        );
        assert!(!result.passed);
        assert!(result.missing().is_empty());
        let extra: Vec<&str> = result.extra().iter().map(|k| k.as_str()).collect();
        assert_eq!(extra, ["KeyQ"]);
    }

    #[test]
    fn nothing_pressed_fails_quietly() {
        let result = ComboResult::evaluate(wasd_space(), &BTreeSet::new());
        assert!(!result.passed);
        assert!(result.pressed.is_empty());
        assert_eq!(result.missing().len(), 5);
    }

    #[test]
    fn select_unknown_keeps_selection() {
        let mut test = ComboTest::new();
        test.select("Arrow Keys").expect("known preset");
        let err = test.select("Nope").unwrap_err();
        assert_eq!(err, GamingError::UnknownCombo("Nope".to_string()));
        assert_eq!(test.selected().map(|c| c.name), Some("Arrow Keys"));
    }

    #[test]
    fn evaluate_without_selection_is_noop() {
        let mut test = ComboTest::new();
        assert!(test.evaluate(&held(&["KeyW"])).is_none());
        assert!(test.results().is_empty());
    }

    #[test]
    fn results_keep_one_entry_per_combo() {
        let mut test = ComboTest::new();
        test.select("WASD + Space").expect("known preset");
        test.evaluate(&held(&["KeyW"]));
        test.evaluate(&held(&["KeyW", "KeyA", "KeyS", "KeyD", "Space"]));
        test.select("Arrow Keys").expect("known preset");
        test.evaluate(&held(&["ArrowUp"]));

        assert_eq!(test.results().len(), 2);
        assert!(test.result_for("WASD + Space").is_some_and(|r| r.passed));
        assert!(test.result_for("Arrow Keys").is_some_and(|r| !r.passed));
    }

    #[test]
    fn live_results_show_missing() {
        let mut test = ComboTest::new();
        test.select("WASD + Space").expect("known preset");
        test.evaluate(&held(&["KeyW", "KeyA", "KeyS", "KeyD"]));
        let results = test.get_results(at(0));
        assert!(results.iter().any(|r| r.label == "Result" && r.value == "FAILED"));
        assert!(results.iter().any(|r| r.label == "Missing" && r.value == "Space"));
    }

    #[test]
    fn reset_clears_results_and_selection() {
        let mut test = ComboTest::new();
        test.select("WASD + Space").expect("known preset");
        test.evaluate(&held(&["KeyW"]));
        test.reset();
        assert!(test.selected().is_none());
        assert!(test.results().is_empty());
    }
}

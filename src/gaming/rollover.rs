//! N-key rollover and anti-ghosting assessment

use super::{GamingTest, InputState, ResultStatus, TestResult};
use crate::config::GamingConfig;
use crate::keyboard::keymap;
use chrono::{DateTime, Local};

/// Rollover capability tier, derived from the session's max simultaneous keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverTier {
    /// Full N-key rollover (10+ keys)
    Full,
    /// 6-key rollover (6 to 9 keys)
    SixKey,
    /// Fewer than 6 keys
    Limited,
}

impl RolloverTier {
    /// Classify a max-simultaneous count against the configured thresholds
    pub fn classify(max_simultaneous: usize, config: &GamingConfig) -> Self {
        if max_simultaneous >= config.full_rollover_min {
            Self::Full
        } else if max_simultaneous >= config.six_key_rollover_min {
            Self::SixKey
        } else {
            Self::Limited
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Full => "Full N-key rollover",
            Self::SixKey => "6-key rollover",
            Self::Limited => "Limited rollover",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Full => "NKRO",
            Self::SixKey => "6KRO",
            Self::Limited => "Limited",
        }
    }

    /// Rollover verdict shown next to the max-simultaneous count
    pub fn rollover_summary(&self) -> &'static str {
        match self {
            Self::Full => "Full N-key rollover detected. Excellent for competitive gaming.",
            Self::SixKey => "Supports 6-key rollover. Standard for most keyboards.",
            Self::Limited => {
                "Limited rollover detected. May experience ghosting in complex key combinations."
            }
        }
    }

    /// Anti-ghosting headline, same tiering as rollover
    pub fn anti_ghosting_status(&self) -> &'static str {
        match self {
            Self::Full | Self::SixKey => "Anti-Ghosting: Active",
            Self::Limited => "Limited Anti-Ghosting",
        }
    }

    pub fn anti_ghosting_summary(&self) -> &'static str {
        match self {
            Self::Full => "Full N-key rollover detected. Ideal for competitive gaming scenarios.",
            Self::SixKey => "6-key rollover support. Suitable for most gaming applications.",
            Self::Limited => {
                "Limited rollover capability. Complex key combinations may experience ghosting."
            }
        }
    }

    pub fn status(&self) -> ResultStatus {
        match self {
            Self::Full => ResultStatus::Ok,
            Self::SixKey => ResultStatus::Warning,
            Self::Limited => ResultStatus::Error,
        }
    }
}

/// Live rollover view: current and peak simultaneous keys
pub struct RolloverTest {
    config: GamingConfig,
    current: usize,
    max_simultaneous: usize,
    active_labels: Vec<String>,
}

impl RolloverTest {
    pub fn new(config: GamingConfig) -> Self {
        Self {
            config,
            current: 0,
            max_simultaneous: 0,
            active_labels: Vec::new(),
        }
    }

    pub fn current_count(&self) -> usize {
        self.current
    }

    pub fn max_rollover(&self) -> usize {
        self.max_simultaneous
    }

    pub fn tier(&self) -> RolloverTier {
        RolloverTier::classify(self.max_simultaneous, &self.config)
    }
}

impl GamingTest for RolloverTest {
    fn name(&self) -> &'static str {
        "N-Key Rollover Test"
    }

    fn description(&self) -> &'static str {
        "Press multiple keys simultaneously to test rollover capability"
    }

    fn process(&mut self, input: &InputState<'_>) {
        self.current = input.pressed.len();
        self.max_simultaneous = self.max_simultaneous.max(input.max_simultaneous);
        self.active_labels = input
            .pressed
            .iter()
            .map(|code| keymap::label_for(code.as_str()).to_string())
            .collect();
    }

    fn get_results(&self, _now: DateTime<Local>) -> Vec<TestResult> {
        let tier = self.tier();
        let mut results = vec![
            TestResult::info("Currently Pressed", format!("{} keys", self.current)),
            TestResult::new(
                "Max Simultaneous",
                format!(
                    "{} key{}",
                    self.max_simultaneous,
                    if self.max_simultaneous == 1 { "" } else { "s" }
                ),
                tier.status(),
            ),
            TestResult::new("Rating", tier.short_label(), tier.status()),
            TestResult::info("Verdict", tier.rollover_summary()),
            TestResult::new("Anti-Ghosting", tier.anti_ghosting_status(), tier.status()),
        ];

        if !self.active_labels.is_empty() {
            results.push(TestResult::info("Active Keys", self.active_labels.join(" + ")));
        }

        results
    }

    fn reset(&mut self) {
        self.current = 0;
        self.max_simultaneous = 0;
        self.active_labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyCode;
    use crate::test_helpers::at;
    use std::collections::BTreeSet;

    fn tier(max: usize) -> RolloverTier {
        RolloverTier::classify(max, &GamingConfig::default())
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(tier(12), RolloverTier::Full);
        assert_eq!(tier(10), RolloverTier::Full);
        assert_eq!(tier(9), RolloverTier::SixKey);
        assert_eq!(tier(7), RolloverTier::SixKey);
        assert_eq!(tier(6), RolloverTier::SixKey);
        assert_eq!(tier(5), RolloverTier::Limited);
        assert_eq!(tier(3), RolloverTier::Limited);
        assert_eq!(tier(0), RolloverTier::Limited);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(tier(12).label(), "Full N-key rollover");
        assert_eq!(tier(7).label(), "6-key rollover");
        assert_eq!(tier(3).label(), "Limited rollover");
    }

    #[test]
    fn anti_ghosting_follows_tier() {
        assert_eq!(tier(10).anti_ghosting_status(), "Anti-Ghosting: Active");
        assert_eq!(tier(6).anti_ghosting_status(), "Anti-Ghosting: Active");
        assert_eq!(tier(5).anti_ghosting_status(), "Limited Anti-Ghosting");
    }

    #[test]
    fn custom_thresholds() {
        let config = GamingConfig {
            full_rollover_min: 8,
            six_key_rollover_min: 4,
            ..GamingConfig::default()
        };
        assert_eq!(RolloverTier::classify(8, &config), RolloverTier::Full);
        assert_eq!(RolloverTier::classify(4, &config), RolloverTier::SixKey);
    }

    #[test]
    fn process_tracks_current_and_peak() {
        let mut test = RolloverTest::new(GamingConfig::default());
        let pressed: BTreeSet<KeyCode> =
            ["KeyW", "KeyA", "KeyS"].into_iter().map(KeyCode::from).collect();
        test.process(&InputState {
            pressed: &pressed,
            press: None,
            max_simultaneous: 3,
        });
        assert_eq!(test.current_count(), 3);
        assert_eq!(test.max_rollover(), 3);

        let empty = BTreeSet::new();
        test.process(&InputState {
            pressed: &empty,
            press: None,
            max_simultaneous: 3,
        });
        assert_eq!(test.current_count(), 0);
        assert_eq!(test.max_rollover(), 3);
    }

    #[test]
    fn results_include_rating_and_active_keys() {
        let mut test = RolloverTest::new(GamingConfig::default());
        let pressed: BTreeSet<KeyCode> = ["KeyW", "Space"].into_iter().map(KeyCode::from).collect();
        test.process(&InputState {
            pressed: &pressed,
            press: None,
            max_simultaneous: 2,
        });
        let results = test.get_results(at(0));
        assert!(results.iter().any(|r| r.label == "Rating" && r.value == "Limited"));
        assert!(results.iter().any(|r| r.label == "Active Keys" && r.value == "W + Space"));
    }

    #[test]
    fn reset_clears() {
        let mut test = RolloverTest::new(GamingConfig::default());
        let pressed: BTreeSet<KeyCode> = ["KeyW"].into_iter().map(KeyCode::from).collect();
        test.process(&InputState {
            pressed: &pressed,
            press: None,
            max_simultaneous: 1,
        });
        test.reset();
        assert_eq!(test.current_count(), 0);
        assert_eq!(test.max_rollover(), 0);
        assert_eq!(test.name(), "N-Key Rollover Test");
    }
}

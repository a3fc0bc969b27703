//! Rapid-press response heuristic
//!
//! Counts presses made in quick succession while gaming mode is active. Not a
//! latency measurement: the average is wall time since the first press divided
//! by the number of presses.

use super::{GamingTest, InputState, ResultStatus, TestResult};
use crate::config::GamingConfig;
use chrono::{DateTime, Local};

/// Overall response rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ready,
    Testing,
    Good,
    Excellent,
}

impl ResponseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Testing => "Testing",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    fn result_status(&self) -> ResultStatus {
        match self {
            Self::Excellent | Self::Good => ResultStatus::Ok,
            Self::Testing => ResultStatus::Warning,
            Self::Ready => ResultStatus::Info,
        }
    }
}

/// Rapid-press counters for the current gaming run
pub struct ResponseTimeTest {
    config: GamingConfig,
    rapid_press_count: u64,
    total_presses: u64,
    /// First press since gaming mode was enabled
    start_time: Option<DateTime<Local>>,
    last_press: Option<DateTime<Local>>,
    last_seq: Option<u64>,
}

impl ResponseTimeTest {
    pub fn new(config: GamingConfig) -> Self {
        Self {
            config,
            rapid_press_count: 0,
            total_presses: 0,
            start_time: None,
            last_press: None,
            last_seq: None,
        }
    }

    pub fn rapid_press_count(&self) -> u64 {
        self.rapid_press_count
    }

    pub fn total_presses(&self) -> u64 {
        self.total_presses
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    /// Mean milliseconds per press since the first press, rounded
    pub fn avg_response_ms(&self, now: DateTime<Local>) -> Option<u64> {
        if self.total_presses == 0 {
            return None;
        }
        let start = self.start_time?;
        let elapsed = (now - start).num_milliseconds().max(0) as f64;
        Some((elapsed / self.total_presses as f64).round() as u64)
    }

    pub fn status(&self) -> ResponseStatus {
        if self.rapid_press_count > self.config.excellent_rapid_presses {
            ResponseStatus::Excellent
        } else if self.rapid_press_count > self.config.good_rapid_presses {
            ResponseStatus::Good
        } else if self.total_presses > 0 {
            ResponseStatus::Testing
        } else {
            ResponseStatus::Ready
        }
    }

    fn record_press(&mut self, timestamp: DateTime<Local>) {
        self.total_presses += 1;

        if let Some(last) = self.last_press {
            let delta = (timestamp - last).num_milliseconds();
            if delta < self.config.rapid_press_window_ms as i64 {
                self.rapid_press_count += 1;
            }
        }

        self.last_press = Some(timestamp);
        if self.start_time.is_none() {
            self.start_time = Some(timestamp);
        }
    }
}

impl GamingTest for ResponseTimeTest {
    fn name(&self) -> &'static str {
        "Response Time Test"
    }

    fn description(&self) -> &'static str {
        "Tap keys rapidly to measure press frequency"
    }

    fn process(&mut self, input: &InputState<'_>) {
        let Some(captured) = input.press else {
            return;
        };
        if self.last_seq.is_some_and(|seq| captured.seq <= seq) {
            return;
        }
        self.last_seq = Some(captured.seq);

        if captured.event.is_repeat {
            return;
        }
        self.record_press(captured.event.timestamp);
    }

    fn get_results(&self, now: DateTime<Local>) -> Vec<TestResult> {
        let status = self.status();
        let avg = match self.avg_response_ms(now) {
            Some(ms) => format!("{}ms", ms),
            None => "-".to_string(),
        };

        vec![
            TestResult::info("Rapid Presses", self.rapid_press_count.to_string()),
            TestResult::info("Total Presses", self.total_presses.to_string()),
            TestResult::info("Average Response", avg),
            TestResult::new("Status", status.label(), status.result_status()),
        ]
    }

    /// The sequence guard survives so a stale press is not counted after a reset.
    fn reset(&mut self) {
        self.rapid_press_count = 0;
        self.total_presses = 0;
        self.start_time = None;
        self.last_press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{CapturedEvent, KeyCode, KeyEvent};
    use crate::test_helpers::{at, down, repeat};
    use std::collections::BTreeSet;

    fn feed(test: &mut ResponseTimeTest, seq: u64, event: KeyEvent) {
        let pressed: BTreeSet<KeyCode> = [event.code.clone()].into_iter().collect();
        let captured = CapturedEvent { seq, event };
        test.process(&InputState {
            pressed: &pressed,
            press: Some(&captured),
            max_simultaneous: 1,
        });
    }

    #[test]
    fn rapid_window_is_strict() {
        let mut test = ResponseTimeTest::new(GamingConfig::default());
        feed(&mut test, 1, down("KeyA", 0));
        feed(&mut test, 2, down("KeyS", 40));
        feed(&mut test, 3, down("KeyD", 80));
        feed(&mut test, 4, down("KeyF", 300));
        feed(&mut test, 5, down("KeyG", 400));

        assert_eq!(test.total_presses(), 5);
        // 40 and 40 are rapid, 220 is not, exactly 100 is not
        assert_eq!(test.rapid_press_count(), 2);
        assert_eq!(test.status(), ResponseStatus::Testing);
    }

    #[test]
    fn average_response_uses_first_press() {
        let mut test = ResponseTimeTest::new(GamingConfig::default());
        feed(&mut test, 1, down("KeyA", 0));
        feed(&mut test, 2, down("KeyS", 40));
        feed(&mut test, 3, down("KeyD", 80));
        feed(&mut test, 4, down("KeyF", 300));
        feed(&mut test, 5, down("KeyG", 400));

        assert_eq!(test.start_time(), Some(at(0)));
        assert_eq!(test.avg_response_ms(at(400)), Some(80));
        assert_eq!(test.avg_response_ms(at(402)), Some(80));
        assert_eq!(test.avg_response_ms(at(403)), Some(81));
    }

    #[test]
    fn repeats_are_ignored() {
        let mut test = ResponseTimeTest::new(GamingConfig::default());
        feed(&mut test, 1, down("KeyA", 0));
        feed(&mut test, 2, repeat("KeyA", 30));
        feed(&mut test, 3, repeat("KeyA", 60));

        assert_eq!(test.total_presses(), 1);
        assert_eq!(test.rapid_press_count(), 0);
    }

    #[test]
    fn same_press_counted_once() {
        let mut test = ResponseTimeTest::new(GamingConfig::default());
        feed(&mut test, 1, down("KeyA", 0));
        feed(&mut test, 1, down("KeyA", 0));
        assert_eq!(test.total_presses(), 1);
    }

    #[test]
    fn status_thresholds() {
        let config = GamingConfig {
            good_rapid_presses: 2,
            excellent_rapid_presses: 4,
            ..GamingConfig::default()
        };
        let mut test = ResponseTimeTest::new(config);
        assert_eq!(test.status(), ResponseStatus::Ready);

        for i in 0..4 {
            feed(&mut test, i + 1, down("KeyA", i as i64 * 10));
        }
        // three rapid presses
        assert_eq!(test.status(), ResponseStatus::Good);

        for i in 4..6 {
            feed(&mut test, i + 1, down("KeyA", i as i64 * 10));
        }
        assert_eq!(test.rapid_press_count(), 5);
        assert_eq!(test.status(), ResponseStatus::Excellent);
    }

    #[test]
    fn no_presses_means_no_average() {
        let test = ResponseTimeTest::new(GamingConfig::default());
        assert_eq!(test.avg_response_ms(at(1_000)), None);
        let results = test.get_results(at(1_000));
        assert!(results.iter().any(|r| r.label == "Status" && r.value == "Ready"));
    }

    #[test]
    fn reset_keeps_sequence_guard() {
        let mut test = ResponseTimeTest::new(GamingConfig::default());
        feed(&mut test, 1, down("KeyA", 0));
        test.reset();
        assert_eq!(test.total_presses(), 0);
        assert!(test.start_time().is_none());

        feed(&mut test, 1, down("KeyA", 0));
        assert_eq!(test.total_presses(), 0);
        feed(&mut test, 2, down("KeyA", 500));
        assert_eq!(test.total_presses(), 1);
        assert_eq!(test.start_time(), Some(at(500)));
    }
}

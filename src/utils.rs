//! Shared formatting helpers

use chrono::{DateTime, Local};

/// Format whole seconds as `"Xm Ys"`
///
/// ```
/// use rollover_testkit::utils::format_duration;
///
/// assert_eq!(format_duration(0), "0m 0s");
/// assert_eq!(format_duration(125), "2m 5s");
/// ```
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Pick the singular or plural noun for `count`
pub fn plural<'a>(count: u64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Wall-clock time of an event, `HH:MM:SS`
pub fn format_time(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Calendar date, `YYYY-MM-DD`
pub fn format_date(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

//! Plain-text summary for clipboard or share

use super::ReportSnapshot;
use crate::utils::{format_date, format_duration, format_time};

pub const SUMMARY_TITLE: &str = "Keyboard & Mouse Test Report";

/// Short plain-text rendering of the core numbers
pub fn compile_text_summary(snapshot: &ReportSnapshot) -> String {
    let mut lines: Vec<String> = vec![SUMMARY_TITLE.to_string(), "=".repeat(40), String::new()];

    if let Some(first) = snapshot.first_interaction_at {
        lines.push(format!("Test Date: {}", format_date(&first)));
        lines.push(format!("Test Time: {}", format_time(&first)));
        lines.push(format!(
            "Duration: {}",
            format_duration(snapshot.duration_secs.unwrap_or(0))
        ));
        lines.push(String::new());
    }

    lines.push("Keyboard summary".to_string());
    lines.push(format!("- Total key presses: {}", snapshot.total_presses));
    lines.push(format!("- Max keys pressed at once: {}", snapshot.max_simultaneous));
    lines.push(format!("- Unique keys tested: {}", snapshot.unique_keys));

    let top_keys = snapshot.config.summary_top_keys;
    if !snapshot.key_counts.is_empty() && top_keys > 0 {
        lines.push("- Most pressed keys:".to_string());
        for (code, count) in snapshot.key_counts.iter().take(top_keys) {
            lines.push(format!("  \u{2022} {}: {} press(es)", code, count));
        }
    }

    lines.push(String::new());
    lines.push("Mouse summary".to_string());
    if snapshot.mouse_history.is_empty() {
        lines.push("- No mouse clicks recorded.".to_string());
    } else {
        for click in snapshot
            .mouse_history
            .iter()
            .take(snapshot.config.summary_mouse_events)
        {
            lines.push(format!(
                "- {} click at x={}, y={} ({})",
                click.button.name(),
                click.x,
                click.y,
                format_time(&click.timestamp)
            ));
        }
    }

    lines.join("\n")
}

//! Paginated session document

use super::ReportSnapshot;
use crate::utils::{format_date, format_duration, format_time, plural};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Error type for report export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A heading with its body lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub heading: String,
    pub lines: Vec<String>,
}

impl Block {
    fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }
}

/// One page of blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub blocks: Vec<Block>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }
}

/// Compiled report, ready to render or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    /// RFC 3339 evaluation time
    pub generated_at: String,
    pub report_date: String,
    pub pages: Vec<Page>,
}

pub const DOCUMENT_TITLE: &str = "Keyboard & Mouse Diagnostic Report";

const SECTION_SESSION: &str = "Session Summary";
const SECTION_KEYBOARD: &str = "Keyboard Statistics";
const SECTION_ROLLOVER: &str = "N-Key Rollover Test";
const SECTION_COMBOS: &str = "Gaming Combo Tests";
const SECTION_RESPONSE: &str = "Response Time Test";
const SECTION_ANTI_GHOSTING: &str = "Anti-Ghosting Status";
const SECTION_MOUSE: &str = "Mouse Statistics";
const SECTION_HISTORY: &str = "Key Event History";

/// Build the full document for a snapshot. Nothing is truncated; long
/// sections continue on the next page.
pub fn compile_document(snapshot: &ReportSnapshot) -> Document {
    let sections = vec![
        session_summary(snapshot),
        keyboard_statistics(snapshot),
        rollover(snapshot),
        combos(snapshot),
        response(snapshot),
        anti_ghosting(snapshot),
        mouse(snapshot),
        key_history(snapshot),
    ];

    Document {
        title: DOCUMENT_TITLE.to_string(),
        generated_at: snapshot.now.to_rfc3339(),
        report_date: format_date(&snapshot.now),
        pages: paginate(sections, snapshot.config.lines_per_page),
    }
}

fn session_summary(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_SESSION);
    block
        .line(format!("Total key presses: {}", snapshot.total_presses))
        .line(format!("Unique keys: {}", snapshot.unique_keys))
        .line(format!("Max keys at once: {}", snapshot.max_simultaneous));
    match snapshot.duration_secs {
        Some(secs) => block.line(format!("Duration: {}", format_duration(secs))),
        None => block.line("No interaction recorded."),
    };
    block
}

fn keyboard_statistics(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_KEYBOARD);
    block
        .line(format!("Total presses: {}", snapshot.total_presses))
        .line(format!("Max keys at once: {}", snapshot.max_simultaneous))
        .line(format!("Unique keys tested: {}", snapshot.unique_keys));

    if snapshot.key_counts.is_empty() {
        block.line("No key presses recorded.");
    } else {
        block.line("Most Pressed Keys:");
        for (code, count) in &snapshot.key_counts {
            block.line(format!(
                "  {}: {} {}",
                code,
                count,
                plural(*count, "press", "presses")
            ));
        }
    }
    block
}

fn rollover(snapshot: &ReportSnapshot) -> Block {
    let max = snapshot.max_simultaneous;
    let tier = snapshot.rollover_tier;
    let mut block = Block::new(SECTION_ROLLOVER);
    block
        .line(format!("Current Keys Pressed: {}", snapshot.current_pressed.len()))
        .line(format!(
            "Max Simultaneous: {} {}",
            max,
            plural(max as u64, "key", "keys")
        ))
        .line(format!("Tier: {}", tier.label()))
        .line(tier.rollover_summary());
    block
}

fn combos(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_COMBOS);
    if snapshot.combo_results.is_empty() {
        block.line("No combo tests performed during this session.");
        return block;
    }

    for (name, result) in &snapshot.combo_results {
        let pressed = if result.pressed.is_empty() {
            "None".to_string()
        } else {
            join_codes(&result.pressed)
        };
        block
            .line(format!(
                "{}: {}",
                name,
                if result.passed { "PASSED" } else { "FAILED" }
            ))
            .line(format!("  Expected: {}", join_codes(&result.expected)))
            .line(format!("  Pressed: {}", pressed));
    }
    block
}

fn join_codes(codes: &[crate::keyboard::KeyCode]) -> String {
    codes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn response(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_RESPONSE);
    match &snapshot.response {
        Some(response) => {
            block
                .line(format!("Rapid Presses: {}", response.rapid_presses))
                .line(format!("Total Presses: {}", response.total_presses))
                .line(format!("Average Response: {}ms", response.avg_response_ms))
                .line(format!("Status: {}", response.status.label()));
        }
        None => {
            block.line("Response time test not performed during this session.");
        }
    }
    block
}

fn anti_ghosting(snapshot: &ReportSnapshot) -> Block {
    let tier = snapshot.rollover_tier;
    let mut block = Block::new(SECTION_ANTI_GHOSTING);
    block
        .line(tier.anti_ghosting_status())
        .line(tier.anti_ghosting_summary());
    block
}

fn mouse(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_MOUSE);
    if snapshot.mouse_history.is_empty() {
        block.line("No mouse clicks recorded.");
        return block;
    }

    block
        .line(format!("Total clicks: {}", snapshot.total_clicks))
        .line("Click History:");
    for click in &snapshot.mouse_history {
        block.line(format!(
            "  {} click at ({}, {}) - {}",
            click.button.name(),
            click.x,
            click.y,
            format_time(&click.timestamp)
        ));
    }
    block
}

fn key_history(snapshot: &ReportSnapshot) -> Block {
    let mut block = Block::new(SECTION_HISTORY);
    if snapshot.key_history.is_empty() {
        block.line("No key events recorded.");
        return block;
    }

    for event in &snapshot.key_history {
        block.line(format!(
            "{} ({}) - {}{}",
            event.key,
            event.code,
            format_time(&event.timestamp),
            if event.is_repeat { " [REPEAT]" } else { "" }
        ));
    }
    block
}

/// Lay sections out on pages of `lines_per_page` lines, headings included.
///
/// A heading never ends a page on its own. A section cut by a page break
/// resumes under "<heading> (continued)".
fn paginate(sections: Vec<Block>, lines_per_page: usize) -> Vec<Page> {
    let per_page = lines_per_page.max(2);
    let mut pages = Vec::new();
    let mut page = Page::new(1);
    let mut used = 0;

    for section in sections {
        if used + 2 > per_page {
            let next = Page::new(page.number + 1);
            pages.push(std::mem::replace(&mut page, next));
            used = 0;
        }

        let mut block = Block::new(section.heading.clone());
        used += 1;

        for line in section.lines {
            if used == per_page {
                page.blocks.push(block);
                let next = Page::new(page.number + 1);
                pages.push(std::mem::replace(&mut page, next));
                block = Block::new(format!("{} (continued)", section.heading));
                used = 1;
            }
            block.lines.push(line);
            used += 1;
        }

        page.blocks.push(block);
    }

    pages.push(page);
    pages
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every heading in page order, continuations included
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .map(|b| b.heading.as_str())
    }

    /// Plain-text rendering with a "Page i of N" footer on every page
    pub fn render_text(&self) -> String {
        let total = self.page_count();
        let mut out = String::new();

        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format!("Report Date: {}\n", self.report_date));
        out.push_str(&"=".repeat(40));
        out.push('\n');

        for page in &self.pages {
            for block in &page.blocks {
                out.push('\n');
                out.push_str(&block.heading);
                out.push('\n');
                for line in &block.lines {
                    out.push_str("  ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push_str(&format!("\n{:^40}\n", format!("Page {} of {}", page.number, total)));
            if page.number < total {
                out.push_str(&"-".repeat(40));
                out.push('\n');
            }
        }

        out
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to a JSON file
    pub fn export_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        info!("report exported to {}", path.display());
        Ok(())
    }

    /// Export the text rendering to a file
    pub fn export_text(&self, path: &Path) -> Result<(), ExportError> {
        let mut file = File::create(path)?;
        file.write_all(self.render_text().as_bytes())?;
        info!("report exported to {}", path.display());
        Ok(())
    }

    /// Suggested file name, dated by the report
    pub fn file_name(&self, extension: &str) -> String {
        format!("keyboard-test-report-{}.{}", self.report_date, extension)
    }
}

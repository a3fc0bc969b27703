//! Custom TUI widgets

use super::theme::ThemeColors;
use crate::gaming::{ResultStatus, TestResult};
use crate::keyboard::{keymap, KeyCode, KeyEvent};
use crate::mouse::{MouseButton, MouseClickEvent};
use crate::utils::{format_duration, format_time};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

fn panel<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.dim))
}

/// Widget for displaying gaming check results
pub struct ResultsPanel<'a> {
    results: &'a [TestResult],
    title: &'a str,
    description: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(results: &'a [TestResult], title: &'a str, colors: ThemeColors) -> Self {
        Self {
            results,
            title,
            description: None,
            colors,
        }
    }

    /// One dim line above the results
    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    fn status_symbol(status: ResultStatus) -> &'static str {
        match status {
            ResultStatus::Ok => "[OK]",
            ResultStatus::Warning => "[!!]",
            ResultStatus::Error => "[XX]",
            ResultStatus::Info => "[--]",
        }
    }
}

impl<'a> Widget for ResultsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(self.title, &self.colors);
        let mut inner = block.inner(area);
        block.render(area, buf);

        if let Some(description) = self.description.filter(|_| inner.height > 0) {
            buf.set_stringn(
                inner.x,
                inner.y,
                description,
                inner.width as usize,
                Style::default().fg(self.colors.dim),
            );
            inner.y += 1;
            inner.height -= 1;
        }

        for (result, y) in self.results.iter().zip(inner.y..inner.y + inner.height) {
            let color = self.colors.status(result.status);
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", Self::status_symbol(result.status)),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!("{}: ", result.label),
                    Style::default().fg(self.colors.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(&result.value, Style::default().fg(color)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

/// Live session counters
pub struct CountersPanel<'a> {
    pub total_presses: u64,
    pub unique_keys: usize,
    pub max_simultaneous: usize,
    pub coverage: (usize, usize),
    pub duration_secs: Option<u64>,
    pub top_keys: &'a [(KeyCode, u64)],
    pub colors: ThemeColors,
}

impl<'a> Widget for CountersPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(" Session ", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let label = Style::default().fg(self.colors.dim);
        let value = Style::default().fg(self.colors.fg).add_modifier(Modifier::BOLD);
        let duration = self
            .duration_secs
            .map_or_else(|| "-".to_string(), format_duration);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Total presses   ", label),
                Span::styled(self.total_presses.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Unique keys     ", label),
                Span::styled(self.unique_keys.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Coverage        ", label),
                Span::styled(format!("{} / {}", self.coverage.0, self.coverage.1), value),
            ]),
            Line::from(vec![
                Span::styled("Max at once     ", label),
                Span::styled(self.max_simultaneous.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Duration        ", label),
                Span::styled(duration, value),
            ]),
        ];

        if !self.top_keys.is_empty() {
            lines.push(Line::from(Span::styled("Most pressed", label)));
            for (code, count) in self.top_keys {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<8}", keymap::label_for(code.as_str())),
                        Style::default().fg(self.colors.accent),
                    ),
                    Span::styled(count.to_string(), value),
                ]));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Recent key events and clicks, newest first
pub struct HistoryPanel<'a> {
    pub keys: &'a [KeyEvent],
    pub clicks: &'a [MouseClickEvent],
    pub colors: ThemeColors,
}

impl<'a> Widget for HistoryPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(" History ", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().fg(self.colors.dim);
        let mut lines = Vec::new();

        if self.keys.is_empty() {
            lines.push(Line::from(Span::styled("Press any key to start", dim)));
        }
        for event in self.keys {
            let mut spans = vec![
                Span::styled(format!("{} ", format_time(&event.timestamp)), dim),
                Span::styled(
                    format!("{} ", event.key),
                    Style::default().fg(self.colors.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("({})", event.code), dim),
            ];
            if event.is_repeat {
                spans.push(Span::styled(" repeat", Style::default().fg(self.colors.yellow)));
            }
            lines.push(Line::from(spans));
        }

        if !self.clicks.is_empty() {
            lines.push(Line::from(""));
        }
        for click in self.clicks {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", format_time(&click.timestamp)), dim),
                Span::styled(
                    format!("{} click at ({}, {})", click.button.name(), click.x, click.y),
                    Style::default().fg(self.colors.accent),
                ),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Mouse test surface. Clicks inside the inner area are recorded.
pub struct MouseSurface<'a> {
    pub last_click: Option<&'a MouseClickEvent>,
    pub total_clicks: u64,
    /// Per-button counts over the recent history
    pub recent_counts: [(MouseButton, usize); 3],
    pub colors: ThemeColors,
}

impl<'a> MouseSurface<'a> {
    /// Inner area that accepts clicks for a given outer area
    pub fn surface(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }
}

impl<'a> Widget for MouseSurface<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Mouse test ({} clicks) ", self.total_clicks);
        let block = panel(&title, &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let hint = "Click here with any button";
        buf.set_string(inner.x + 1, inner.y, hint, Style::default().fg(self.colors.dim));

        if inner.height > 1 {
            let counts = self
                .recent_counts
                .iter()
                .map(|(button, count)| format!("{} {}", button.name(), count))
                .collect::<Vec<_>>()
                .join("  ");
            buf.set_stringn(
                inner.x + 1,
                inner.y + inner.height - 1,
                counts,
                inner.width.saturating_sub(1) as usize,
                Style::default().fg(self.colors.dim),
            );
        }

        if let Some(click) = self.last_click {
            let x = inner.x.saturating_add(u16::try_from(click.x).unwrap_or(0));
            let y = inner.y.saturating_add(u16::try_from(click.y).unwrap_or(0));
            if x < inner.x + inner.width && y < inner.y + inner.height {
                buf.set_string(x, y, "\u{25CF}", Style::default().fg(self.colors.green));
            }
        }
    }
}

/// Scrollable rendering of the compiled report
pub struct ReportPanel<'a> {
    pub text: &'a str,
    pub scroll: u16,
    pub colors: ThemeColors,
}

impl<'a> Widget for ReportPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(" Report preview (Alt+Up/Down to scroll) ", &self.colors);
        Paragraph::new(self.text)
            .style(Style::default().fg(self.colors.fg))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

/// Widget for the help screen
pub struct HelpPanel {
    pub colors: ThemeColors,
}

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel("Help - Rollover TestKit", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = [
            "",
            " COMMANDS (hold Alt)",
            " -----------",
            " Alt+V / Alt+B    : Next / previous view",
            " Alt+G            : Toggle gaming mode",
            " Alt+N            : Next combo preset",
            " Alt+R            : Reset the session",
            " Alt+E            : Export report (text and JSON)",
            " Alt+S            : Share summary",
            " Alt+L            : Switch ANSI / ISO layout",
            " Alt+Q / Ctrl+C   : Quit",
            "",
            " TESTS",
            " -----------",
            " Keyboard         : Every key you press lights up and counts",
            " Gaming           : Rollover tier, combo check, rapid-press rate",
            " Report           : Paginated session report",
            "",
            " Every other key is recorded, including Esc, Tab and F-keys.",
        ];

        for (line, y) in help_text.iter().zip(inner.y..inner.y + inner.height) {
            let style = if line.contains("---") {
                Style::default().fg(self.colors.dim)
            } else if *line == " COMMANDS (hold Alt)" || *line == " TESTS" {
                Style::default().fg(self.colors.yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.fg)
            };
            buf.set_string(inner.x, y, line, style);
        }
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    mode: &'a str,
    view: &'a str,
    elapsed: &'a str,
    presses: u64,
    message: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(mode: &'a str, view: &'a str, elapsed: &'a str, presses: u64, colors: ThemeColors) -> Self {
        Self {
            mode,
            view,
            elapsed,
            presses,
            message: None,
            colors,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(self.colors.dim).fg(self.colors.bg);
        buf.set_style(area, bg_style);

        let left = format!(" {} | {} ", self.mode, self.view);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        if let Some(msg) = self.message {
            let msg_style = bg_style.fg(self.colors.yellow);
            let msg_x = area.x + (area.width / 2).saturating_sub(msg.len() as u16 / 2);
            buf.set_string(msg_x, area.y, msg, msg_style);
        }

        let right = format!(" {} | Presses: {} ", self.elapsed, self.presses);
        let right_x = area.x + area.width.saturating_sub(right.len() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}

/// Tab bar widget
pub struct TabBar<'a> {
    tabs: &'a [&'a str],
    selected: usize,
    colors: ThemeColors,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [&'a str], selected: usize, colors: ThemeColors) -> Self {
        Self {
            tabs,
            selected,
            colors,
        }
    }
}

impl<'a> Widget for TabBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.colors.dim));
        let mut x = area.x;

        for (i, tab) in self.tabs.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(self.colors.bg)
                    .bg(self.colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.fg).bg(self.colors.dim)
            };

            let label = format!(" {} ", tab);
            let width = label.len() as u16;
            if x + width > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &label, style);
            x += width + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn results_panel_draws_labels_and_symbols() {
        let results = vec![
            TestResult::ok("Rating", "NKRO"),
            TestResult::error("Result", "FAILED"),
        ];
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ResultsPanel::new(&results, "Checks", ThemeColors::dark()).render(area, &mut buf);

        let drawn = text(&buf);
        assert!(drawn.contains("[OK] Rating: NKRO"));
        assert!(drawn.contains("[XX] Result: FAILED"));
    }

    #[test]
    fn results_panel_shows_description_first() {
        let results = vec![TestResult::info("Presses", "0")];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        ResultsPanel::new(&results, "Response", ThemeColors::dark())
            .description("Rapid-press timing")
            .render(area, &mut buf);

        let drawn = text(&buf);
        let lines: Vec<&str> = drawn.lines().collect();
        assert!(lines[1].contains("Rapid-press timing"));
        assert!(lines[2].contains("[--] Presses: 0"));
    }

    #[test]
    fn mouse_surface_shows_button_counts() {
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        MouseSurface {
            last_click: None,
            total_clicks: 3,
            recent_counts: [
                (MouseButton::Left, 2),
                (MouseButton::Middle, 1),
                (MouseButton::Right, 0),
            ],
            colors: ThemeColors::dark(),
        }
        .render(area, &mut buf);

        let drawn = text(&buf);
        let lines: Vec<&str> = drawn.lines().collect();
        assert!(lines[0].contains("(3 clicks)"));
        assert!(lines[4].contains("left 2  middle 1  right 0"));
    }

    #[test]
    fn mouse_surface_inner_area() {
        let surface = MouseSurface::surface(Rect::new(2, 3, 20, 6));
        assert_eq!(surface, Rect::new(3, 4, 18, 4));
    }

    #[test]
    fn tab_bar_marks_selection() {
        let tabs = ["Keyboard", "Gaming"];
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        let colors = ThemeColors::dark();
        TabBar::new(&tabs, 1, colors).render(area, &mut buf);

        assert!(text(&buf).contains(" Gaming "));
        assert_eq!(buf[(12, 0)].bg, colors.accent);
    }
}

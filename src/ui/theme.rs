//! Theme color definitions for the UI
//!
//! Dark and light palettes, selected from the `[ui] theme` setting.

use crate::config::Theme;
use crate::gaming::ResultStatus;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, active tab)
    pub accent: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    /// Key never pressed
    pub key_off: Color,
    /// Key held right now
    pub key_on: Color,
    /// Key pressed at least once
    pub key_tested: Color,
    pub key_text: Color,
    pub key_text_on: Color,
}

impl ThemeColors {
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 22, 30),
            fg: Color::Rgb(200, 200, 210),
            dim: Color::Rgb(90, 90, 110),
            accent: Color::Rgb(80, 200, 220),
            green: Color::Rgb(80, 200, 120),
            yellow: Color::Rgb(240, 180, 80),
            red: Color::Rgb(240, 90, 100),
            key_off: Color::Rgb(40, 40, 50),
            key_on: Color::Rgb(80, 200, 120),
            key_tested: Color::Rgb(45, 75, 95),
            key_text: Color::Rgb(180, 180, 190),
            key_text_on: Color::Rgb(20, 20, 25),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            green: Color::Rgb(30, 150, 70),
            yellow: Color::Rgb(180, 120, 0),
            red: Color::Rgb(200, 50, 60),
            key_off: Color::Rgb(220, 220, 228),
            key_on: Color::Rgb(30, 150, 70),
            key_tested: Color::Rgb(185, 215, 235),
            key_text: Color::Rgb(50, 50, 60),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }

    /// Color for a result status
    pub fn status(&self, status: ResultStatus) -> Color {
        match status {
            ResultStatus::Ok => self.green,
            ResultStatus::Warning => self.yellow,
            ResultStatus::Error => self.red,
            ResultStatus::Info => self.accent,
        }
    }

    /// Background and label colors for a key cap
    pub fn key(&self, pressed: bool, tested: bool) -> (Color, Color) {
        if pressed {
            (self.key_on, self.key_text_on)
        } else if tested {
            (self.key_tested, self.key_text)
        } else {
            (self.key_off, self.key_text)
        }
    }
}

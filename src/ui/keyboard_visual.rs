//! Visual keyboard layout rendering

use super::theme::ThemeColors;
use crate::keyboard::keymap;
use crate::keyboard::layout::{self, VisualKey};
use crate::keyboard::{CaptureStore, KeyboardLayout};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

const GAP: u16 = 1;
const BLOCK_GAP: u16 = 2;

/// Visual representation of a keyboard: held keys lit, tested keys tinted
pub struct KeyboardVisual<'a> {
    capture: &'a CaptureStore,
    layout: KeyboardLayout,
    show_numpad: bool,
    colors: ThemeColors,
}

impl<'a> KeyboardVisual<'a> {
    pub fn new(capture: &'a CaptureStore, layout: KeyboardLayout, colors: ThemeColors) -> Self {
        Self {
            capture,
            layout,
            show_numpad: true,
            colors,
        }
    }

    pub fn show_numpad(mut self, show: bool) -> Self {
        self.show_numpad = show;
        self
    }

    /// Cells needed to draw `rows` side by side
    fn block_width(rows: &[Vec<VisualKey>]) -> u16 {
        rows.iter()
            .map(|row| {
                let keys: u16 = row.iter().map(|k| k.width).sum();
                keys + GAP * (row.len() as u16).saturating_sub(1)
            })
            .max()
            .unwrap_or(0)
    }

    fn render_key(&self, buf: &mut Buffer, area: Rect, x: u16, y: u16, key: &VisualKey) {
        if key.code.is_empty() {
            return;
        }
        if y >= area.y + area.height || x + key.width > area.x + area.width {
            return;
        }

        let pressed = self.capture.is_pressed(key.code);
        let (bg, fg) = self.colors.key(pressed, self.capture.is_tested(key.code));
        let mut style = Style::default().fg(fg).bg(bg);
        if pressed {
            style = style.add_modifier(Modifier::BOLD);
        }
        let label = if keymap::MAC_LABELS {
            keymap::mac_label(key.code).unwrap_or(key.label)
        } else {
            key.label
        };
        buf.set_string(
            x,
            y,
            format!("{:^w$}", label, w = key.width as usize),
            style,
        );
    }

    fn render_block(&self, buf: &mut Buffer, area: Rect, x0: u16, y0: u16, rows: &[Vec<VisualKey>]) {
        for (i, row) in rows.iter().enumerate() {
            let mut x = x0;
            for key in row {
                self.render_key(buf, area, x, y0 + i as u16, key);
                x += key.width + GAP;
            }
        }
    }
}

impl<'a> Widget for KeyboardVisual<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let main = layout::main_rows(self.layout);
        let main_width = Self::block_width(&main);

        if area.width < main_width + 1 || area.height < main.len() as u16 {
            buf.set_string(
                area.x,
                area.y,
                "Window too small for keyboard",
                Style::default().fg(self.colors.dim),
            );
            return;
        }

        let x0 = area.x + 1;
        self.render_block(buf, area, x0, area.y, &main);

        let nav = layout::nav_rows();
        let nav_x = x0 + main_width + BLOCK_GAP;
        let nav_width = Self::block_width(&nav);
        if nav_x + nav_width > area.x + area.width {
            return;
        }
        self.render_block(buf, area, nav_x, area.y, &nav);

        if !self.show_numpad {
            return;
        }
        let pad = layout::numpad_rows();
        let pad_x = nav_x + nav_width + BLOCK_GAP;
        if pad_x + Self::block_width(&pad) > area.x + area.width {
            return;
        }
        // numpad starts at the number row
        self.render_block(buf, area, pad_x, area.y + 1, &pad);
    }
}

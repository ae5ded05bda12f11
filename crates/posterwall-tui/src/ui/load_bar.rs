//! Population progress bar.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// A horizontal bar showing how much of a collection has been appended.
pub struct LoadBar {
    /// Value to display (0.0 - 1.0).
    ratio: f64,
    filled_style: Style,
    empty_style: Style,
}

impl LoadBar {
    const FILLED: char = '█';
    const EMPTY: char = '░';

    /// Create a new load bar.
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            filled_style: Style::default(),
            empty_style: Style::default(),
        }
    }

    /// Set the style for the filled portion.
    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }

    /// Set the style for the empty portion.
    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }
}

impl Widget for LoadBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (area.width as f64 * self.ratio).round() as u16;

        for x in 0..area.width {
            let (symbol, style) = if x < filled_width {
                (Self::FILLED, self.filled_style)
            } else {
                (Self::EMPTY, self.empty_style)
            };

            buf[(area.x + x, area.y)].set_char(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_load_bar_empty() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        LoadBar::new(0.0).render(area, &mut buf);
        assert_eq!(symbols(&buf, 10), "░".repeat(10));
    }

    #[test]
    fn test_load_bar_half() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        LoadBar::new(0.5).render(area, &mut buf);
        assert_eq!(symbols(&buf, 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
    }

    #[test]
    fn test_load_bar_clamps() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        LoadBar::new(3.0).render(area, &mut buf);
        assert_eq!(symbols(&buf, 4), "████");
    }
}

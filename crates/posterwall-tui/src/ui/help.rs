//! Help overlay widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};

use crate::event::{HelpSection, get_help_sections};
use crate::theme::Theme;

/// Help overlay showing key bindings organized by section.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_sections(&self, sections: &[HelpSection], area: Rect, buf: &mut Buffer) {
        let bottom = area.y + area.height;
        let mut y = area.y;

        for section in sections {
            if y >= bottom {
                break;
            }

            let title_line = Line::from(Span::styled(
                section.title,
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x, y, &title_line, area.width);
            y += 1;

            for binding in &section.bindings {
                if y >= bottom {
                    break;
                }
                let line = Line::from(vec![
                    Span::styled(format!("{:>12}", binding.keys), self.theme.help_key),
                    Span::styled(format!(" {}", binding.description), self.theme.help_desc),
                ]);
                buf.set_line(area.x, y, &line, area.width);
                y += 1;
            }

            // Spacing between sections
            y += 1;
        }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 48.min(area.width.saturating_sub(4));
        let popup_height = 22.min(area.height.saturating_sub(2));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Help - Press ? or Esc to close ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        self.render_sections(&get_help_sections(), inner, buf);
    }
}

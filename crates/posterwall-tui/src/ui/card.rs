//! Poster card widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use posterwall_core::{ItemModel, ThumbnailSource};
use posterwall_grid::{CardVisual, SlotWidget};

use crate::theme::Theme;
use crate::ui::truncate_to_width;

/// Terminal card slot. Holds the face of the item it is bound to.
#[derive(Debug, Clone, Default)]
pub struct TermCard {
    visual: Option<CardVisual>,
}

impl TermCard {
    pub fn visual(&self) -> Option<&CardVisual> {
        self.visual.as_ref()
    }
}

impl SlotWidget for TermCard {
    fn create() -> Self {
        Self::default()
    }

    fn bind(&mut self, _model: &ItemModel, visual: &CardVisual) {
        self.visual = Some(visual.clone());
    }

    fn unbind(&mut self) {
        self.visual = None;
    }
}

/// "2021 · Released" style subtitle.
pub fn meta_line(visual: &CardVisual) -> String {
    let year = visual.year.map(|y| y.to_string());
    let status = visual.status.as_ref().map(|s| s.to_string());
    [year, status].into_iter().flatten().collect::<Vec<_>>().join(" · ")
}

fn poster_glyph(source: ThumbnailSource) -> &'static str {
    match source {
        ThumbnailSource::Embedded => "◆",
        ThumbnailSource::File => "▣",
        ThumbnailSource::Missing => "·",
    }
}

/// Renders a [`TermCard`].
pub struct CardView<'a> {
    card: &'a TermCard,
    theme: &'a Theme,
    selected: bool,
}

impl<'a> CardView<'a> {
    pub fn new(card: &'a TermCard, theme: &'a Theme) -> Self {
        Self {
            card,
            theme,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.selected {
            self.theme.card_selected
        } else {
            self.theme.border
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(visual) = self.card.visual() else {
            return;
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;

        let mut top = vec![Span::styled(poster_glyph(visual.thumbnail), self.theme.poster)];
        if let Some(badge) = visual.badge {
            top.push(Span::raw(" "));
            top.push(Span::styled(
                format!(" {} ", badge.label()),
                self.theme.badge_style(badge, visual.tone, visual.pulse),
            ));
        }

        let title_style = if self.selected {
            self.theme.card_selected
        } else {
            self.theme.card
        };
        let lines = [
            Line::from(top),
            Line::styled(truncate_to_width(&visual.title, width), title_style),
            Line::styled(truncate_to_width(&meta_line(visual), width), self.theme.card_meta),
        ];

        for (offset, line) in lines.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_line(inner.x, y, line, inner.width);
        }
    }
}

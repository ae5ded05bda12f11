//! Poster grid widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use posterwall_grid::VirtualizedCollectionRenderer;

use crate::theme::Theme;
use crate::ui::card::{CardView, TermCard};

/// Terminal lines per card row.
pub const CARD_HEIGHT: u16 = 5;

/// Selection and scroll state for a grid.
#[derive(Debug, Default, Clone)]
pub struct GridState {
    /// Selected collection index.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl GridState {
    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_right(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move one row up. Returns false on the first row.
    pub fn move_up(&mut self, columns: usize) -> bool {
        if self.selected >= columns {
            self.selected -= columns;
            true
        } else {
            false
        }
    }

    /// Move one row down, landing on the last card of a short final row.
    /// Returns false on the last row.
    pub fn move_down(&mut self, columns: usize, len: usize) -> bool {
        let columns = columns.max(1);
        if len == 0 {
            return false;
        }
        let last_row = (len - 1) / columns;
        if self.selected / columns >= last_row {
            return false;
        }
        self.selected = (self.selected + columns).min(len - 1);
        true
    }

    pub fn page_up(&mut self, columns: usize, rows: usize) {
        self.selected = self.selected.saturating_sub(columns * rows.max(1));
    }

    pub fn page_down(&mut self, columns: usize, rows: usize, len: usize) {
        self.selected = (self.selected + columns * rows.max(1)).min(len.saturating_sub(1));
    }

    pub fn jump_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn jump_to_bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the selection inside a collection of `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Scroll so the selected row is inside the viewport.
    pub fn ensure_visible(&mut self, columns: usize, viewport_rows: usize) {
        let row = self.selected / columns.max(1);
        let rows = viewport_rows.max(1);
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + rows {
            self.offset = row + 1 - rows;
        }
    }
}

/// Draws the bound cards of a renderer.
pub struct GridView<'a> {
    renderer: &'a VirtualizedCollectionRenderer<TermCard>,
    state: &'a GridState,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> GridView<'a> {
    pub fn new(
        renderer: &'a VirtualizedCollectionRenderer<TermCard>,
        state: &'a GridState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            renderer,
            state,
            theme,
            focused: true,
        }
    }

    /// Highlight the selected card only when focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.renderer.config().columns.max(1);
        let card_width = area.width / columns as u16;
        let rows = (area.height / CARD_HEIGHT) as usize;
        if card_width == 0 || rows == 0 {
            return;
        }

        for (index, slot) in self.renderer.bound_cards() {
            let row = index / columns;
            if row < self.state.offset || row >= self.state.offset + rows {
                continue;
            }
            let column = (index % columns) as u16;
            let cell = Rect::new(
                area.x + column * card_width,
                area.y + (row - self.state.offset) as u16 * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );

            CardView::new(slot.widget(), self.theme)
                .selected(self.focused && index == self.state.selected)
                .render(cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_moves() {
        let mut state = GridState::default();
        assert!(!state.move_up(5));

        assert!(state.move_down(5, 12));
        assert_eq!(state.selected, 5);
        assert!(state.move_down(5, 12));
        assert_eq!(state.selected, 10);
        assert!(!state.move_down(5, 12));

        state.selected = 8;
        assert!(state.move_down(5, 12));
        assert_eq!(state.selected, 11);
    }

    #[test]
    fn test_left_right_bounds() {
        let mut state = GridState::default();
        state.move_left();
        assert_eq!(state.selected, 0);

        state.move_right(2);
        state.move_right(2);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_ensure_visible() {
        let mut state = GridState {
            selected: 37,
            offset: 0,
        };
        state.ensure_visible(5, 3);
        assert_eq!(state.offset, 5);

        state.selected = 4;
        state.ensure_visible(5, 3);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_paging_and_clamp() {
        let mut state = GridState::default();
        state.page_down(5, 4, 50);
        assert_eq!(state.selected, 20);
        state.page_down(5, 40, 50);
        assert_eq!(state.selected, 49);
        state.page_up(5, 4);
        assert_eq!(state.selected, 29);

        state.clamp(10);
        assert_eq!(state.selected, 9);
        state.clamp(0);
        assert_eq!(state.selected, 0);
    }
}

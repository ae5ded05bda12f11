//! UI components and widgets.

mod card;
mod grid;
mod help;
mod load_bar;

pub use card::{CardView, TermCard, meta_line};
pub use grid::{CARD_HEIGHT, GridState, GridView};
pub use help::HelpOverlay;
pub use load_bar::LoadBar;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    /// Tab bar, only while the home page is on top.
    pub tabs: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect, show_tabs: bool) -> Self {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let (tabs, main) = if show_tabs {
            let [tabs, main] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(content);
            (Some(tabs), main)
        } else {
            (None, content)
        };

        Self {
            header,
            tabs,
            main,
            footer,
        }
    }
}

/// Cut `text` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("The Silent Harbor", 8), "The Sil…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(truncate_to_width("七人の侍", 5), "七人…");
    }

    #[test]
    fn test_layout_hides_tabs() {
        let area = Rect::new(0, 0, 80, 24);
        let with = AppLayout::new(area, true);
        let without = AppLayout::new(area, false);
        assert!(with.tabs.is_some());
        assert!(without.tabs.is_none());
        assert_eq!(without.main.height, with.main.height + 1);
    }
}

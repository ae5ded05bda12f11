//! Application rendering.

use indexmap::IndexMap;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Widget};
use strum::IntoEnumIterator;

use posterwall_core::{ItemModel, RendererId, ThumbnailSource};
use posterwall_grid::{CardVisual, PresentationState};
use posterwall_nav::NavigationCoordinator;

use crate::theme::Theme;
use crate::ui::{AppLayout, CARD_HEIGHT, GridView, HelpOverlay, LoadBar, meta_line};

use super::constants::{PREVIEW_ROWS, SECTION_CHROME};
use super::panes::GridPane;
use super::state::{AppMode, Page, StatusLevel, StatusMessage, Tab};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub tab: Tab,
    pub theme: &'a Theme,
    pub nav: &'a NavigationCoordinator<Page>,
    pub panes: &'a IndexMap<RendererId, GridPane>,
    pub page: Option<&'a Page>,
    pub focused: Option<RendererId>,
    pub show_tabs: bool,
    pub status: Option<&'a StatusMessage>,
}

/// Card rows that fit inside a bordered section.
pub fn grid_rows(area: Rect) -> usize {
    (area.height.saturating_sub(SECTION_CHROME) / CARD_HEIGHT) as usize
}

/// Movies and series preview areas of the dashboard.
pub fn dashboard_sections(area: Rect) -> [Rect; 2] {
    let height = PREVIEW_ROWS as u16 * CARD_HEIGHT + SECTION_CHROME;
    let [movies, series, _] = Layout::vertical([
        Constraint::Max(height),
        Constraint::Max(height),
        Constraint::Min(0),
    ])
    .areas(area);
    [movies, series]
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area, ctx.show_tabs);

    render_header(ctx, layout.header, buf);
    if let Some(tabs) = layout.tabs {
        render_tabs(ctx, tabs, buf);
    }

    match ctx.page {
        Some(Page::Dashboard { movies, series }) => {
            let [movies_area, series_area] = dashboard_sections(layout.main);
            render_pane(ctx, *movies, movies_area, buf);
            render_pane(ctx, *series, series_area, buf);
        }
        Some(Page::Library(id) | Page::Expanded(id)) => render_pane(ctx, *id, layout.main, buf),
        Some(Page::Detail { item, .. }) => render_detail(ctx, item, layout.main, buf),
        Some(Page::Home) | None => {}
    }

    render_footer(ctx, layout.footer, buf);

    if ctx.mode == AppMode::Help {
        HelpOverlay::new(ctx.theme).render(area, buf);
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let chrome = ctx.nav.visible_chrome();
    let back = chrome.iter().any(|c| c.back_visible);

    let mut spans = vec![Span::styled(
        " posterwall ",
        ctx.theme.title.add_modifier(Modifier::BOLD),
    )];
    if back {
        spans.push(Span::styled("‹ ", ctx.theme.help_key));
    }
    let crumbs = chrome
        .iter()
        .map(|c| c.title.as_str())
        .collect::<Vec<_>>()
        .join(" › ");
    spans.push(Span::styled(crumbs, ctx.theme.header));

    if let Some(status) = ctx.status {
        let color = match status.level {
            StatusLevel::Info => ctx.theme.success,
            StatusLevel::Warning => ctx.theme.warning,
            StatusLevel::Error => ctx.theme.error,
        };
        spans.push(Span::styled(format!("  {} ", status.text), Style::default().fg(color)));
    }

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.header)
        .render(area, buf);
}

fn render_tabs(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let titles: Vec<String> = Tab::iter().map(|t| format!(" {} ", t)).collect();

    Tabs::new(titles)
        .select(ctx.tab as usize)
        .style(ctx.theme.footer)
        .highlight_style(ctx.theme.selected)
        .render(area, buf);
}

fn render_pane(ctx: &RenderContext, id: RendererId, area: Rect, buf: &mut Buffer) {
    let Some(pane) = ctx.panes.get(&id) else {
        return;
    };
    let focused = ctx.focused == Some(id);
    let summary = pane.renderer.summary();

    let mut title = format!(" {} ", pane.kind.plural());
    match pane.renderer.expand_label() {
        Some(label) if summary.has_more => title.push_str(&format!("· {label} (a) ")),
        _ => title.push_str(&format!("· {} ", summary.shown)),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { ctx.theme.card_selected } else { ctx.theme.border })
        .title(title)
        .title_style(ctx.theme.title);
    let inner = block.inner(area);
    block.render(area, buf);

    match pane.renderer.state() {
        PresentationState::Loading => render_loading(ctx, pane, inner, buf),
        PresentationState::Empty => {
            Paragraph::new(Line::styled(
                format!("  No {} yet", pane.kind.plural().to_lowercase()),
                Style::default().fg(ctx.theme.muted),
            ))
            .render(inner, buf);
        }
        PresentationState::Filled => {
            GridView::new(&pane.renderer, &pane.state, ctx.theme)
                .focused(focused)
                .render(inner, buf);
        }
    }
}

fn render_loading(ctx: &RenderContext, pane: &GridPane, area: Rect, buf: &mut Buffer) {
    if area.height < 2 || area.width < 4 {
        return;
    }
    let Some(progress) = pane.renderer.progress() else {
        return;
    };

    let label = Line::from(vec![
        Span::styled(
            "  Loading ",
            Style::default()
                .fg(ctx.theme.info)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} / {}", progress.appended, progress.total),
            ctx.theme.help_desc,
        ),
    ]);
    buf.set_line(area.x, area.y, &label, area.width);

    let bar_area = Rect::new(area.x + 2, area.y + 1, area.width - 4, 1);
    LoadBar::new(progress.fraction())
        .filled_style(ctx.theme.progress_bar)
        .empty_style(ctx.theme.progress_bg)
        .render(bar_area, buf);
}

fn render_detail(ctx: &RenderContext, item: &ItemModel, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border)
        .title(format!(" {} ", item.title))
        .title_style(ctx.theme.title);
    let inner = block.inner(area);
    block.render(area, buf);

    let visual = CardVisual::from_model(item);
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<10}"), ctx.theme.help_desc),
            Span::styled(value, ctx.theme.card),
        ])
    };

    let poster = match visual.thumbnail {
        ThumbnailSource::Embedded => "bundled",
        ThumbnailSource::File => "on disk",
        ThumbnailSource::Missing => "none",
    };

    let mut lines = vec![
        Line::raw(""),
        row("Kind", item.kind.to_string()),
        row("Released", meta_line(&visual)),
        row("Watched", if item.flags.watched { "yes" } else { "no" }.to_string()),
        row("Poster", poster.to_string()),
        row("Sort key", item.sort_key.as_str().to_string()),
    ];
    if let Some(badge) = visual.badge {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", "Badge"), ctx.theme.help_desc),
            Span::styled(
                format!(" {} ", badge.label()),
                ctx.theme.badge_style(badge, visual.tone, visual.pulse),
            ),
        ]));
    }

    Paragraph::new(lines).render(inner, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let mut keys: Vec<(&str, &str)> = match ctx.page {
        Some(Page::Detail { .. }) => vec![("w", "Watched"), ("Bksp", "Back")],
        Some(Page::Dashboard { .. }) => vec![("hjkl", "Nav"), ("Enter", "Open"), ("a", "Show all"), ("Tab", "Tabs")],
        Some(Page::Library(_)) => vec![("hjkl", "Nav"), ("Enter", "Open"), ("r", "Reload"), ("Tab", "Tabs")],
        Some(Page::Expanded(_)) => vec![("hjkl", "Nav"), ("Enter", "Open"), ("Bksp", "Back")],
        Some(Page::Home) | None => Vec::new(),
    };

    keys.extend([("t", "Theme"), ("?", "Help"), ("q", "Quit")]);

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), ctx.theme.help_key),
                Span::styled(format!("{} ", desc), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}

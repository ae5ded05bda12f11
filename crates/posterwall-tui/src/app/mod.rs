//! Main application state and logic.

mod constants;
mod panes;
mod render;
pub mod state;

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use indexmap::IndexMap;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use strum::IntoEnumIterator;

use posterwall_catalog::Catalog;
use posterwall_core::{GridConfig, LayerId, LoadMode, MediaKind, RenderError, RendererId};
use posterwall_grid::{RefreshStyle, TickOutcome};
use posterwall_nav::{Dispatch, NavigationCoordinator, NavigationPage};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::AppLayout;

use self::constants::{MIN_TICK_INTERVAL, PREVIEW_ROWS};
use self::render::{RenderContext, dashboard_sections, grid_rows, render_app};

pub use self::panes::{GridPane, TabContent, expanded_page};
pub use self::state::{AppMode, Page, StatusLevel, StatusMessage, Tab, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Current mode.
    mode: AppMode,
    /// Active tab on the home page.
    tab: Tab,
    /// Color theme.
    theme: Theme,
    /// Persistent settings.
    settings: UserSettings,
    /// Config for every renderer the app creates.
    grid_config: GridConfig,
    /// Collection provider; edits are written back here.
    catalog: Catalog,
    /// File the catalog was loaded from, saved after each edit.
    catalog_path: Option<PathBuf>,
    /// Layer tree: the root layer plus one child layer per mounted tab.
    nav: NavigationCoordinator<Page>,
    /// One entry per tab, mounted lazily.
    tabs: Vec<TabContent>,
    /// Live grids by renderer.
    panes: IndexMap<RendererId, GridPane>,
    /// Preview section focused on the dashboard.
    dashboard_focus: MediaKind,
    /// One-line message shown in the header.
    status: Option<StatusMessage>,
    /// Write settings back on change.
    persist_settings: bool,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
}

impl App {
    /// Create an app using the settings stored on disk.
    pub fn new(catalog: Catalog, config: TuiConfig) -> AppResult<Self> {
        Self::with_settings(catalog, config, UserSettings::load())
    }

    /// Create an app with explicit settings.
    pub fn with_settings(catalog: Catalog, config: TuiConfig, settings: UserSettings) -> AppResult<Self> {
        let grid_config = config.grid.unwrap_or_else(|| settings.grid_config());
        let tab = config.initial_tab.unwrap_or(settings.default_tab);

        tracing::info!(
            target: "tui",
            items = catalog.len(),
            %tab,
            pool_capacity = grid_config.pool_capacity,
            chunk_size = grid_config.chunk_size,
            "starting"
        );

        let mut app = Self {
            mode: AppMode::Normal,
            tab,
            theme: Theme::from_variant(settings.theme),
            settings,
            grid_config,
            catalog,
            catalog_path: config.catalog_path,
            nav: NavigationCoordinator::new(Page::Home, "Home").with_policy(config.nav_policy),
            tabs: Tab::iter().map(TabContent::new).collect(),
            panes: IndexMap::new(),
            dashboard_focus: MediaKind::Movie,
            status: None,
            persist_settings: config.persist_settings,
            needs_redraw: true,
        };
        app.show_tab(tab)?;
        Ok(app)
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn nav(&self) -> &NavigationCoordinator<Page> {
        &self.nav
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pane(&self, id: RendererId) -> Option<&GridPane> {
        self.panes.get(&id)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Run the application main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let period = self.grid_config.tick_interval.max(MIN_TICK_INTERVAL);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                let size = terminal.size()?;
                self.fit_viewports(Rect::new(0, 0, size.width, size.height))?;
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    match event {
                        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                            let action = KeyAction::from_key_event(key_event);
                            self.handle_action(action)?;
                        }
                        Event::Resize(..) => {}
                        _ => continue,
                    }
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    if self.tick_panes()? {
                        self.needs_redraw = true;
                    }
                }
            }
        }

        tracing::info!(target: "tui", "exiting");
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    /// Advance every running population by one chunk.
    ///
    /// Returns whether anything changed on screen. Stale and disposed
    /// renderers are skipped; any other render error ends the session.
    pub fn tick_panes(&mut self) -> AppResult<bool> {
        let mut changed = false;
        for pane in self.panes.values_mut() {
            match pane.renderer.tick() {
                Ok(TickOutcome::Idle) => {}
                Ok(TickOutcome::Appended { .. }) => changed = true,
                Ok(TickOutcome::Completed { .. }) => {
                    pane.refit()?;
                    changed = true;
                }
                Err(err) if err.is_benign() => {
                    tracing::debug!(target: "tui", renderer = %pane.id(), error = %err, "tick skipped");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(changed)
    }

    /// Size every visible grid to the terminal.
    fn fit_viewports(&mut self, area: Rect) -> AppResult<()> {
        let layout = AppLayout::new(area, self.on_home());
        let Some(page) = self.visible_page().cloned() else {
            return Ok(());
        };

        match page {
            Page::Dashboard { movies, series } => {
                let [movies_area, series_area] = dashboard_sections(layout.main);
                for (id, section) in [(movies, movies_area), (series, series_area)] {
                    if let Some(pane) = self.panes.get_mut(&id) {
                        pane.fit(grid_rows(section).min(PREVIEW_ROWS))?;
                    }
                }
            }
            Page::Library(id) | Page::Expanded(id) => {
                if let Some(pane) = self.panes.get_mut(&id) {
                    pane.fit(grid_rows(layout.main))?;
                }
            }
            Page::Home | Page::Detail { .. } => {}
        }
        Ok(())
    }

    /// Whether the home page (and with it the tab bar) is showing.
    fn on_home(&self) -> bool {
        self.nav
            .top_page(self.nav.root())
            .is_ok_and(|page| matches!(page.content, Page::Home))
    }

    /// Page to draw: the root layer's top, or the active tab's top on home.
    pub fn visible_page(&self) -> Option<&Page> {
        let top = &self.nav.top_page(self.nav.root()).ok()?.content;
        match top {
            Page::Home => {
                let layer = self.tabs.get(self.tab as usize)?.layer()?;
                Some(&self.nav.top_page(layer).ok()?.content)
            }
            page => Some(page),
        }
    }

    /// Grid receiving movement and activation keys.
    pub fn focused_pane_id(&self) -> Option<RendererId> {
        match self.visible_page()? {
            Page::Dashboard { movies, series } => Some(match self.dashboard_focus {
                MediaKind::Movie => *movies,
                MediaKind::Series => *series,
            }),
            Page::Library(id) | Page::Expanded(id) => Some(*id),
            Page::Home | Page::Detail { .. } => None,
        }
    }

    fn focused_pane_mut(&mut self) -> Option<&mut GridPane> {
        let id = self.focused_pane_id()?;
        self.panes.get_mut(&id)
    }

    fn with_focused<T>(&mut self, f: impl FnOnce(&mut GridPane) -> Result<T, RenderError>) -> AppResult<()> {
        if let Some(pane) = self.focused_pane_mut() {
            f(pane)?;
        }
        Ok(())
    }

    fn on_dashboard(&self) -> bool {
        matches!(self.visible_page(), Some(Page::Dashboard { .. }))
    }

    /// Handle a key action.
    pub fn handle_action(&mut self, action: KeyAction) -> AppResult<()> {
        if self.mode == AppMode::Help {
            if matches!(action, KeyAction::ToggleHelp | KeyAction::Quit | KeyAction::Cancel) {
                self.mode = AppMode::Normal;
            }
            return Ok(());
        }

        self.status = None;
        match action {
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.toggle_theme(),

            KeyAction::MoveUp => self.move_up()?,
            KeyAction::MoveDown => self.move_down()?,
            KeyAction::MoveLeft => self.with_focused(GridPane::move_left)?,
            KeyAction::MoveRight => self.with_focused(GridPane::move_right)?,
            KeyAction::PageUp => self.with_focused(GridPane::page_up)?,
            KeyAction::PageDown => self.with_focused(GridPane::page_down)?,
            KeyAction::JumpToTop => self.with_focused(GridPane::jump_to_top)?,
            KeyAction::JumpToBottom => self.with_focused(GridPane::jump_to_bottom)?,

            KeyAction::Activate => self.activate_selected()?,
            KeyAction::ShowAll => self.request_expand()?,
            KeyAction::NavigateBack | KeyAction::Cancel => self.navigate_back()?,
            KeyAction::ToggleWatched => self.toggle_watched()?,
            KeyAction::Refresh => self.refresh_focused()?,

            KeyAction::NextTab if self.on_home() => self.show_tab(self.tab.next())?,
            KeyAction::PrevTab if self.on_home() => self.show_tab(self.tab.prev())?,
            KeyAction::NextTab | KeyAction::PrevTab | KeyAction::None => {}
        }
        Ok(())
    }

    fn move_up(&mut self) -> AppResult<()> {
        let Some(pane) = self.focused_pane_mut() else {
            return Ok(());
        };
        let moved = pane.move_up()?;
        if !moved && self.dashboard_focus == MediaKind::Series && self.on_dashboard() {
            self.dashboard_focus = MediaKind::Movie;
        }
        Ok(())
    }

    fn move_down(&mut self) -> AppResult<()> {
        let Some(pane) = self.focused_pane_mut() else {
            return Ok(());
        };
        let moved = pane.move_down()?;
        if !moved && self.dashboard_focus == MediaKind::Movie && self.on_dashboard() {
            self.dashboard_focus = MediaKind::Series;
        }
        Ok(())
    }

    /// Switch tabs, mounting the new tab on first display.
    fn show_tab(&mut self, tab: Tab) -> AppResult<()> {
        if tab != self.tab
            && let Some(old) = self.tabs[self.tab as usize].layer()
        {
            self.nav.set_hidden(old, true)?;
        }

        self.tab = tab;
        let layer = self.tabs[tab as usize].ensure_loaded(
            &mut self.nav,
            &mut self.panes,
            &self.catalog,
            &self.grid_config,
        )?;
        self.nav.set_hidden(layer, false)?;
        self.dashboard_focus = MediaKind::Movie;
        Ok(())
    }

    /// Activate the selected card of the focused grid.
    fn activate_selected(&mut self) -> AppResult<()> {
        let Some(pane) = self.focused_pane_mut() else {
            return Ok(());
        };
        let index = pane.state.selected;
        match pane.renderer.activate(index, Instant::now()) {
            Ok(true) => self.pump_navigation(),
            Ok(false) => Ok(()),
            Err(err) if err.is_benign() => {
                tracing::debug!(target: "tui", error = %err, "activation ignored");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Ask the focused preview to expand.
    fn request_expand(&mut self) -> AppResult<()> {
        let Some(pane) = self.focused_pane_mut() else {
            return Ok(());
        };
        if pane.renderer.request_expand() {
            self.pump_navigation()
        } else {
            self.status = Some(StatusMessage::info("Already showing everything"));
            Ok(())
        }
    }

    /// Route queued renderer events through the coordinator.
    fn pump_navigation(&mut self) -> AppResult<()> {
        let dispatched = self.nav.pump(|activation, layer| {
            NavigationPage::new(
                Page::Detail {
                    item: activation.model.clone(),
                    from: activation.source,
                },
                activation.model.title.clone(),
                layer,
            )
        });

        for dispatch in dispatched {
            if let Dispatch::Expand { layer, source } = dispatch {
                self.open_expanded(layer, source)?;
            }
        }
        Ok(())
    }

    /// Push the full collection behind preview `source` onto `layer`.
    fn open_expanded(&mut self, layer: LayerId, source: RendererId) -> AppResult<()> {
        let Some(kind) = self.panes.get(&source).map(|pane| pane.kind) else {
            return Ok(());
        };

        let mut pane = GridPane::new(kind, LoadMode::Full, self.grid_config.clone());
        self.nav.register(layer, pane.subscribe())?;
        pane.load(&self.catalog, RefreshStyle::ShowLoading)?;
        self.nav.push(layer, expanded_page(&pane, layer))?;
        self.panes.insert(pane.id(), pane);
        Ok(())
    }

    /// Pop the innermost visible layer that can go back.
    fn navigate_back(&mut self) -> AppResult<()> {
        if self.nav.back_target().is_none() {
            return Ok(());
        }
        let page = self.nav.back()?;
        for id in page.content.renderers() {
            self.close_pane(id);
        }
        Ok(())
    }

    fn close_pane(&mut self, id: RendererId) {
        self.nav.unregister(id);
        if let Some(mut pane) = self.panes.shift_remove(&id) {
            pane.renderer.dispose();
        }
    }

    /// Flip the watched flag of the item on the detail page.
    ///
    /// The detail page is replaced in one step and grids showing the
    /// collection reload without a loading state.
    fn toggle_watched(&mut self) -> AppResult<()> {
        let root = self.nav.root();
        let Some(layer) = self.nav.layer(root) else {
            return Ok(());
        };
        let Page::Detail { item, from } = &layer.top().content else {
            return Ok(());
        };
        let (item, from) = (item.clone(), *from);
        let pages = layer.pages();
        let mut stack = pages[..pages.len() - 1].to_vec();

        let Some(updated) = self.catalog.update(item.with_watched(!item.flags.watched)) else {
            self.status = Some(StatusMessage::warning(format!(
                "{} is no longer in the catalog",
                item.title
            )));
            return Ok(());
        };

        stack.push(NavigationPage::new(
            Page::Detail {
                item: updated.clone(),
                from,
            },
            updated.title.clone(),
            root,
        ));
        self.nav.replace(root, stack)?;

        for pane in self.panes.values_mut().filter(|pane| pane.kind == updated.kind) {
            pane.load(&self.catalog, RefreshStyle::Silent)?;
        }

        let watched = updated.flags.watched;
        tracing::info!(target: "tui", item = %updated.id, watched, source = %from, "watched flag toggled");
        self.status = Some(StatusMessage::info(if watched {
            "Marked as watched"
        } else {
            "Marked as unwatched"
        }));
        self.save_catalog();
        Ok(())
    }

    /// Write the catalog back to the file it came from.
    fn save_catalog(&mut self) {
        let Some(path) = &self.catalog_path else {
            return;
        };
        if let Err(err) = self.catalog.save_json(path) {
            tracing::warn!(target: "tui", path = %path.display(), error = %err, "failed to save catalog");
            self.status = Some(StatusMessage::error(format!("Could not save catalog: {err}")));
        }
    }

    /// Reload the focused grid from the catalog.
    fn refresh_focused(&mut self) -> AppResult<()> {
        let Some(id) = self.focused_pane_id() else {
            return Ok(());
        };
        if let Some(pane) = self.panes.get_mut(&id) {
            let summary = pane.load(&self.catalog, RefreshStyle::ShowLoading)?;
            self.status = Some(StatusMessage::info(format!("Reloaded {} items", summary.shown)));
        }
        Ok(())
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.settings.theme = self.theme.variant;
        if self.persist_settings
            && let Err(err) = self.settings.save()
        {
            tracing::warn!(target: "tui", error = %err, "failed to save settings");
            self.status = Some(StatusMessage::error(format!("Could not save settings: {err}")));
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: self.mode,
            tab: self.tab,
            theme: &self.theme,
            nav: &self.nav,
            panes: &self.panes,
            page: self.visible_page(),
            focused: self.focused_pane_id(),
            show_tabs: self.on_home(),
            status: self.status.as_ref(),
        };
        render_app(&ctx, area, buf);
    }
}

//! Grid panes and lazily mounted tab content.

use indexmap::IndexMap;

use posterwall_catalog::CollectionProvider;
use posterwall_core::{
    CollectionSummary, GridConfig, LayerId, LoadMode, MediaKind, RenderError, RendererId,
};
use posterwall_grid::{BusSubscription, RefreshStyle, VirtualizedCollectionRenderer, WindowDiff};
use posterwall_nav::{NavigationCoordinator, NavigationPage};

use crate::ui::{GridState, TermCard};

use super::AppResult;
use super::state::{Page, Tab};

/// One on-screen grid: a renderer plus its selection.
pub struct GridPane {
    pub renderer: VirtualizedCollectionRenderer<TermCard>,
    pub state: GridState,
    pub kind: MediaKind,
    mode: LoadMode,
    visible_rows: usize,
}

impl GridPane {
    pub fn new(kind: MediaKind, mode: LoadMode, config: GridConfig) -> Self {
        let renderer = VirtualizedCollectionRenderer::new(config);
        tracing::debug!(target: "tui", renderer = %renderer.id(), %kind, ?mode, "grid pane created");
        Self {
            renderer,
            state: GridState::default(),
            kind,
            mode,
            visible_rows: 1,
        }
    }

    pub fn id(&self) -> RendererId {
        self.renderer.id()
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn columns(&self) -> usize {
        self.renderer.config().columns.max(1)
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Rows the slot pool can cover at once.
    pub fn max_rows(&self) -> usize {
        (self.renderer.config().pool_capacity / self.columns()).max(1)
    }

    pub fn subscribe(&mut self) -> BusSubscription {
        self.renderer.subscribe()
    }

    /// Fetch the pane's collection and hand it to the renderer.
    pub fn load<P: CollectionProvider>(
        &mut self,
        provider: &P,
        style: RefreshStyle,
    ) -> AppResult<CollectionSummary> {
        let fetched = provider.fetch_collection(self.kind, self.mode)?;
        let summary = self
            .renderer
            .refresh(fetched.items, Some(fetched.total_count), self.mode, style)?;
        self.refit()?;
        Ok(summary)
    }

    /// Size the viewport to `rows` card rows and rebind slots.
    pub fn fit(&mut self, rows: usize) -> Result<WindowDiff, RenderError> {
        self.visible_rows = rows.clamp(1, self.max_rows());
        self.refit()
    }

    /// Keep the selection on screen after it moved.
    pub fn refit(&mut self) -> Result<WindowDiff, RenderError> {
        let columns = self.columns();
        let extent = self.renderer.config().row_extent;
        // Clamp against the final size so a silent reload keeps the selection
        self.state.clamp(self.renderer.summary().shown);
        self.state.ensure_visible(columns, self.visible_rows);
        self.renderer.set_viewport(
            self.state.offset as f32 * extent,
            self.visible_rows as f32 * extent,
        )
    }

    pub fn move_left(&mut self) -> Result<WindowDiff, RenderError> {
        self.state.move_left();
        self.refit()
    }

    pub fn move_right(&mut self) -> Result<WindowDiff, RenderError> {
        self.state.move_right(self.renderer.len());
        self.refit()
    }

    /// Returns false when already on the first row.
    pub fn move_up(&mut self) -> Result<bool, RenderError> {
        let moved = self.state.move_up(self.columns());
        self.refit()?;
        Ok(moved)
    }

    /// Returns false when already on the last row.
    pub fn move_down(&mut self) -> Result<bool, RenderError> {
        let moved = self.state.move_down(self.columns(), self.renderer.len());
        self.refit()?;
        Ok(moved)
    }

    pub fn page_up(&mut self) -> Result<WindowDiff, RenderError> {
        self.state.page_up(self.columns(), self.visible_rows);
        self.refit()
    }

    pub fn page_down(&mut self) -> Result<WindowDiff, RenderError> {
        self.state
            .page_down(self.columns(), self.visible_rows, self.renderer.len());
        self.refit()
    }

    pub fn jump_to_top(&mut self) -> Result<WindowDiff, RenderError> {
        self.state.jump_to_top();
        self.refit()
    }

    pub fn jump_to_bottom(&mut self) -> Result<WindowDiff, RenderError> {
        self.state.jump_to_bottom(self.renderer.len());
        self.refit()
    }
}

/// Content of one tab, mounted as a child layer of the home page.
#[derive(Debug)]
pub struct TabContent {
    tab: Tab,
    layer: Option<LayerId>,
}

impl TabContent {
    pub fn new(tab: Tab) -> Self {
        Self { tab, layer: None }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn is_loaded(&self) -> bool {
        self.layer.is_some()
    }

    /// Mount the tab's layer and load its collections on first display.
    ///
    /// Cards route to the outermost layer, so details cover the tab bar.
    pub fn ensure_loaded<P: CollectionProvider>(
        &mut self,
        nav: &mut NavigationCoordinator<Page>,
        panes: &mut IndexMap<RendererId, GridPane>,
        provider: &P,
        config: &GridConfig,
    ) -> AppResult<LayerId> {
        if let Some(layer) = self.layer {
            return Ok(layer);
        }

        let root = nav.root();
        let host = nav
            .layer(root)
            .map(|layer| layer.root_page().id())
            .ok_or_else(|| color_eyre::eyre::eyre!("root layer missing"))?;

        let mut open = |kind: MediaKind, mode: LoadMode| -> AppResult<RendererId> {
            let mut pane = GridPane::new(kind, mode, config.clone());
            nav.register(root, pane.subscribe())?;
            pane.load(provider, RefreshStyle::ShowLoading)?;
            let id = pane.id();
            panes.insert(id, pane);
            Ok(id)
        };

        let content = match self.tab.kind() {
            None => {
                let preview = LoadMode::Limited(config.preview_limit);
                Page::Dashboard {
                    movies: open(MediaKind::Movie, preview)?,
                    series: open(MediaKind::Series, preview)?,
                }
            }
            Some(kind) => Page::Library(open(kind, LoadMode::Full)?),
        };

        let layer = nav.create_layer(root, host, content, self.tab.to_string())?;
        tracing::info!(target: "tui", tab = %self.tab, layer = %layer, "tab mounted");
        self.layer = Some(layer);
        Ok(layer)
    }
}

/// Page pushed when a preview is expanded.
pub fn expanded_page(pane: &GridPane, layer: LayerId) -> NavigationPage<Page> {
    NavigationPage::new(Page::Expanded(pane.id()), pane.kind.plural(), layer)
}

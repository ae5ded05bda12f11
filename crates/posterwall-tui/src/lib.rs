//! Terminal user interface for posterwall.
//!
//! This crate hosts the virtualized grids and layered navigation in an
//! interactive TUI built with ratatui.
//!
//! # Overview
//!
//! - **Dashboard tab** - Movie and series previews with a "Show All" action
//! - **Movies / Series tabs** - Full collections, populated in chunks
//! - **Detail pages** - Pushed on the outermost layer, covering the tab bar
//!
//! # Usage
//!
//! ```rust,no_run
//! use posterwall_catalog::SyntheticLibrary;
//! use posterwall_tui::TuiConfig;
//!
//! let catalog = SyntheticLibrary::new(1400, 300).build().unwrap();
//! posterwall_tui::run(catalog, TuiConfig::new()).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `h`/`j`/`k`/`l` - Move selection
//! - `Enter` - Open details
//! - `a` - Show the whole collection behind a preview
//! - `Backspace` - Navigate back
//! - `Tab` - Switch tab
//! - `w` - Toggle watched
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;

use posterwall_catalog::Catalog;
use posterwall_core::{GridConfig, NavErrorPolicy};

pub use app::{App, AppResult, StatusLevel, StatusMessage, Tab, UserSettings};
pub use theme::{Theme, ThemeVariant};

/// Launch options for the TUI.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Grid config; `None` uses the stored settings.
    pub grid: Option<GridConfig>,
    /// Tab to open; `None` uses the stored settings.
    pub initial_tab: Option<Tab>,
    /// How navigation errors are surfaced.
    pub nav_policy: NavErrorPolicy,
    /// Write settings changes back to disk.
    pub persist_settings: bool,
    /// Catalog file that edits are saved to.
    pub catalog_path: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            grid: None,
            initial_tab: None,
            nav_policy: NavErrorPolicy::default(),
            persist_settings: true,
            catalog_path: None,
        }
    }
}

impl TuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_initial_tab(mut self, tab: Tab) -> Self {
        self.initial_tab = Some(tab);
        self
    }

    pub fn with_nav_policy(mut self, policy: NavErrorPolicy) -> Self {
        self.nav_policy = policy;
        self
    }

    /// Save catalog edits to `path`.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Keep settings changes in memory only.
    pub fn without_persistence(mut self) -> Self {
        self.persist_settings = false;
        self
    }
}

/// Run the TUI application.
pub fn run(catalog: Catalog, config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let app = App::new(catalog, config)?;
    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

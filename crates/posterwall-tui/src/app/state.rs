//! Application state types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use posterwall_core::{GridConfig, MediaKind, RendererId, SharedItem};

use crate::theme::ThemeVariant;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    Quit,
}

/// Severity of a header message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown in the header until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

/// Top-level tab shown on the home page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, FromRepr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Movies,
    Series,
}

impl Tab {
    /// Move to next tab (cyclic).
    pub fn next(self) -> Self {
        let current = self as usize;
        let next = (current + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }

    /// Move to previous tab (cyclic).
    pub fn prev(self) -> Self {
        let current = self as usize;
        let count = Self::iter().count();
        let prev = (current + count - 1) % count;
        Self::from_repr(prev).unwrap_or_default()
    }

    /// Collection shown by a library tab.
    pub fn kind(self) -> Option<MediaKind> {
        match self {
            Self::Dashboard => None,
            Self::Movies => Some(MediaKind::Movie),
            Self::Series => Some(MediaKind::Series),
        }
    }
}

/// Content of a navigation page.
#[derive(Debug, Clone)]
pub enum Page {
    /// Root page hosting the tab layers.
    Home,
    /// Two preview sections.
    Dashboard { movies: RendererId, series: RendererId },
    /// Full collection of a library tab.
    Library(RendererId),
    /// Full collection opened from a preview.
    Expanded(RendererId),
    /// One item, opened by activating a card of `from`.
    Detail { item: SharedItem, from: RendererId },
}

impl Page {
    /// Renderers whose cards the page shows.
    pub fn renderers(&self) -> Vec<RendererId> {
        match self {
            Self::Dashboard { movies, series } => vec![*movies, *series],
            Self::Library(id) | Self::Expanded(id) => vec![*id],
            Self::Home | Self::Detail { .. } => Vec::new(),
        }
    }
}

/// Persistent user settings stored in config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Color theme.
    pub theme: ThemeVariant,
    /// Tab shown on startup.
    pub default_tab: Tab,
    /// Grid tuning.
    pub grid: GridConfig,
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("posterwall").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, or return defaults.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| match toml::from_str(&content) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    tracing::warn!(target: "tui", path = %path.display(), error = %err, "ignoring unreadable settings");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to `path`.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Grid config that passed builder validation.
    ///
    /// Invalid values from a hand-edited file fall back to the defaults.
    pub fn grid_config(&self) -> GridConfig {
        let grid = &self.grid;
        let built = GridConfig::builder()
            .pool_capacity(grid.pool_capacity)
            .chunk_size(grid.chunk_size)
            .sync_threshold(grid.sync_threshold)
            .columns(grid.columns)
            .row_extent(grid.row_extent)
            .overscan_rows(grid.overscan_rows)
            .debounce_window(grid.debounce_window)
            .preview_limit(grid.preview_limit)
            .tick_interval(grid.tick_interval)
            .build();

        built.unwrap_or_else(|err| {
            tracing::warn!(target: "tui", error = %err, "invalid grid settings, using defaults");
            GridConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Dashboard.next(), Tab::Movies);
        assert_eq!(Tab::Series.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Series);
        assert_eq!(Tab::Movies.kind(), Some(MediaKind::Movie));
        assert_eq!(Tab::Dashboard.to_string(), "Dashboard");
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posterwall").join("settings.toml");

        let mut settings = UserSettings {
            theme: ThemeVariant::Light,
            default_tab: Tab::Series,
            ..Default::default()
        };
        settings.grid.chunk_size = 40;
        settings.grid.debounce_window = Duration::from_millis(300);
        settings.save_to(&path).unwrap();

        let loaded = UserSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "default_tab = \"movies\"\n\n[grid]\ncolumns = 4\n").unwrap();

        let loaded = UserSettings::load_from(&path);
        assert_eq!(loaded.default_tab, Tab::Movies);
        assert_eq!(loaded.theme, ThemeVariant::Dark);
        assert_eq!(loaded.grid.columns, 4);
        assert_eq!(loaded.grid.pool_capacity, 25);
    }

    #[test]
    fn test_invalid_grid_falls_back() {
        let mut settings = UserSettings::default();
        settings.grid.columns = 40;
        assert_eq!(settings.grid_config(), GridConfig::default());

        settings.grid.columns = 4;
        assert_eq!(settings.grid_config().columns, 4);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = UserSettings::load_from(&dir.path().join("nope.toml"));
        assert_eq!(loaded, UserSettings::default());
    }
}

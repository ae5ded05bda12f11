//! Grid configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of reusable card slots per renderer.
pub const DEFAULT_POOL_CAPACITY: usize = 25;

/// Default number of items appended per scheduling tick.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Default activation guard window.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// Smallest accepted row height.
pub const MIN_ROW_EXTENT: f32 = 1e-3;

/// Configuration for a virtualized grid renderer.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GridConfig {
    /// Number of reusable card slots. Never grows after construction.
    #[builder(default = "DEFAULT_POOL_CAPACITY")]
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,

    /// Items appended per scheduling tick during incremental population.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Largest collection inserted in one go (None = `chunk_size`).
    #[builder(default)]
    #[serde(default)]
    pub sync_threshold: Option<usize>,

    /// Cards per row.
    #[builder(default = "5")]
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Height of one row, in the same unit as scroll offsets.
    #[builder(default = "1.0")]
    #[serde(default = "default_row_extent")]
    pub row_extent: f32,

    /// Rows bound beyond the viewport for smooth scrolling.
    #[builder(default = "1")]
    #[serde(default = "default_overscan_rows")]
    pub overscan_rows: usize,

    /// Repeated activations of the same renderer inside this window are dropped.
    #[builder(default = "DEFAULT_DEBOUNCE_WINDOW")]
    #[serde(default = "default_debounce_window", with = "duration_ms")]
    pub debounce_window: Duration,

    /// Items shown by a preview (`LoadMode::Limited`).
    #[builder(default = "10")]
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Delay between population ticks.
    #[builder(default = "Duration::from_millis(8)")]
    #[serde(default = "default_tick_interval", with = "duration_ms")]
    pub tick_interval: Duration,
}

fn default_pool_capacity() -> usize {
    DEFAULT_POOL_CAPACITY
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_columns() -> usize {
    5
}

fn default_row_extent() -> f32 {
    1.0
}

fn default_overscan_rows() -> usize {
    1
}

fn default_debounce_window() -> Duration {
    DEFAULT_DEBOUNCE_WINDOW
}

fn default_preview_limit() -> usize {
    10
}

fn default_tick_interval() -> Duration {
    Duration::from_millis(8)
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

impl GridConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let positive = [
            ("pool_capacity", self.pool_capacity),
            ("chunk_size", self.chunk_size),
            ("columns", self.columns),
            ("preview_limit", self.preview_limit),
        ];
        for (name, value) in positive {
            if value == Some(0) {
                return Err(format!("{name} must be greater than zero"));
            }
        }
        if let Some(Some(0)) = self.sync_threshold {
            return Err("sync_threshold must be greater than zero".to_string());
        }
        if let Some(extent) = self.row_extent
            && !(extent.is_finite() && extent >= MIN_ROW_EXTENT)
        {
            return Err(format!("row_extent must be a finite value of at least {MIN_ROW_EXTENT}"));
        }
        let capacity = self.pool_capacity.unwrap_or(DEFAULT_POOL_CAPACITY);
        let columns = self.columns.unwrap_or(5);
        if capacity < columns {
            return Err(format!(
                "pool_capacity ({capacity}) must hold at least one row of {columns} columns"
            ));
        }
        Ok(())
    }
}

impl GridConfig {
    /// Create a new grid config builder.
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }

    /// Largest collection that is inserted without chunking.
    pub fn sync_threshold(&self) -> usize {
        self.sync_threshold.unwrap_or(self.chunk_size)
    }

    /// Copy of this config with a different column count.
    ///
    /// The pool grows to hold at least one row if needed.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self.pool_capacity = self.pool_capacity.max(self.columns);
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sync_threshold: None,
            columns: 5,
            row_extent: 1.0,
            overscan_rows: 1,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            preview_limit: 10,
            tick_interval: Duration::from_millis(8),
        }
    }
}

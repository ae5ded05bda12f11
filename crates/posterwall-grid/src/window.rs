//! Visible window computation.

use std::ops::Range;

use posterwall_core::GridConfig;

/// Contiguous range of collection indices that currently need a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionWindow {
    pub first: usize,
    pub count: usize,
}

impl CollectionWindow {
    pub fn new(first: usize, count: usize) -> Self {
        Self { first, count }
    }

    /// One past the last index.
    pub fn end(&self) -> usize {
        self.first + self.count
    }

    pub fn range(&self) -> Range<usize> {
        self.first..self.end()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Indices that gained or lost a slot when the window moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowDiff {
    pub entering: Vec<usize>,
    pub leaving: Vec<usize>,
}

impl WindowDiff {
    pub fn is_empty(&self) -> bool {
        self.entering.is_empty() && self.leaving.is_empty()
    }
}

/// Compute which indices of a `len`-item grid need a slot.
///
/// Whole rows are covered: the rows under the viewport plus
/// `overscan_rows` on each side. When that exceeds the pool, overscan is
/// dropped first, then trailing rows. The result always lies inside
/// `[0, len)` and never holds more than `pool_capacity` indices.
pub fn compute_window(len: usize, scroll_offset: f32, viewport_extent: f32, config: &GridConfig) -> CollectionWindow {
    let columns = config.columns.max(1);
    if len == 0 || !viewport_extent.is_finite() || viewport_extent <= 0.0 {
        return CollectionWindow::default();
    }

    let row_extent = if config.row_extent.is_finite() && config.row_extent > 0.0 {
        config.row_extent
    } else {
        1.0
    };
    let scroll = if scroll_offset.is_finite() {
        scroll_offset.max(0.0)
    } else {
        0.0
    };

    let total_rows = len.div_ceil(columns);
    let capacity_rows = (config.pool_capacity / columns).max(1);
    let first_row = ((scroll / row_extent).floor() as usize).min(total_rows - 1);
    // Rows past the pool can never be bound.
    let visible_rows = ((viewport_extent / row_extent).ceil() as usize).clamp(1, capacity_rows);

    let mut start_row = first_row.saturating_sub(config.overscan_rows);
    let mut end_row = first_row
        .saturating_add(visible_rows)
        .saturating_add(config.overscan_rows)
        .min(total_rows);

    if end_row - start_row > capacity_rows {
        start_row = first_row;
        end_row = start_row.saturating_add(capacity_rows).min(total_rows);
    }

    let first = start_row * columns;
    let end = (end_row * columns).min(len);
    let count = (end - first).min(config.pool_capacity);
    CollectionWindow { first, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(columns: usize, capacity: usize, overscan: usize) -> GridConfig {
        GridConfig {
            columns,
            pool_capacity: capacity,
            overscan_rows: overscan,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_empty_collection() {
        let window = compute_window(0, 0.0, 10.0, &GridConfig::default());
        assert!(window.is_empty());
    }

    #[test]
    fn test_zero_viewport() {
        let window = compute_window(100, 0.0, 0.0, &GridConfig::default());
        assert!(window.is_empty());
    }

    #[test]
    fn test_top_of_grid() {
        // 5 columns, 3 visible rows, 1 overscan row below
        let window = compute_window(1000, 0.0, 3.0, &config(5, 25, 1));
        assert_eq!(window, CollectionWindow::new(0, 20));
    }

    #[test]
    fn test_scrolled_includes_overscan() {
        let window = compute_window(1000, 10.0, 3.0, &config(5, 25, 1));
        assert_eq!(window.first, 45);
        assert_eq!(window.count, 25);
    }

    #[test]
    fn test_capped_to_pool() {
        let window = compute_window(1000, 10.0, 8.0, &config(5, 25, 1));
        assert_eq!(window.first, 50);
        assert_eq!(window.count, 25);
    }

    #[test]
    fn test_clamped_past_end() {
        let window = compute_window(12, 500.0, 3.0, &config(5, 25, 1));
        assert!(window.end() <= 12);
        assert!(window.contains(11));
    }

    #[test]
    fn test_non_finite_scroll() {
        let window = compute_window(30, f32::NAN, 2.0, &config(5, 25, 0));
        assert_eq!(window, CollectionWindow::new(0, 10));
    }

    #[test]
    fn test_infinite_viewport() {
        let window = compute_window(100, 0.0, f32::INFINITY, &GridConfig::default());
        assert!(window.is_empty());
    }

    #[test]
    fn test_tiny_row_extent_stays_within_pool() {
        let cfg = GridConfig {
            row_extent: 1e-30,
            ..GridConfig::default()
        };
        let window = compute_window(100, 0.0, 3.0, &cfg);
        assert_eq!(window.first, 0);
        assert_eq!(window.count, cfg.pool_capacity);
    }

    #[test]
    fn test_huge_viewport_capped_to_pool() {
        let window = compute_window(1000, 5.0, f32::MAX, &config(5, 25, 1));
        assert_eq!(window.first, 25);
        assert_eq!(window.count, 25);
    }

    #[test]
    fn test_window_always_in_bounds() {
        let cfg = config(4, 16, 2);
        for len in [1usize, 3, 7, 16, 17, 100] {
            for scroll in [0.0f32, 0.5, 2.0, 9.0, 40.0] {
                for extent in [0.5f32, 1.0, 3.0, 10.0] {
                    let window = compute_window(len, scroll, extent, &cfg);
                    assert!(window.end() <= len, "len {len} scroll {scroll} extent {extent}");
                    assert!(window.count <= cfg.pool_capacity);
                    assert!(!window.is_empty());
                }
            }
        }
    }
}

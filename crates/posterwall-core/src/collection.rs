//! Ordered item collections and load modes.

use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::item::{ItemId, ItemModel};

/// Shared handle to an item.
///
/// Renderers reference the provider's items instead of copying them.
pub type SharedItem = Arc<ItemModel>;

/// How much of a collection a renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "limit")]
pub enum LoadMode {
    /// Show every item.
    #[default]
    Full,
    /// Show only the first `n` items (compact preview).
    Limited(usize),
}

impl LoadMode {
    /// Maximum number of items this mode keeps, if bounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Full => None,
            Self::Limited(n) => Some(*n),
        }
    }

    /// Check if this is a preview mode.
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Limited(_))
    }
}

/// Summary of an ingest: how many items are shown versus available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Number of items the renderer will hold once population completes.
    pub shown: usize,
    /// Number of items available from the provider.
    pub total_count: usize,
    /// Whether items beyond the shown ones exist.
    pub has_more: bool,
}

impl CollectionSummary {
    /// Build a summary from the shown and total counts.
    pub fn new(shown: usize, total_count: usize) -> Self {
        Self {
            shown,
            total_count,
            has_more: total_count > shown,
        }
    }
}

/// Reorder items by sort key, keeping equal keys in their original order.
pub fn sort_stable(items: &mut [SharedItem]) {
    // slice::sort_by is a stable sort
    items.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
}

/// Drop items whose id already appeared earlier in the sequence.
///
/// Returns the kept items and the ids that were dropped.
pub fn dedup_by_id(items: impl IntoIterator<Item = SharedItem>) -> (Vec<SharedItem>, Vec<ItemId>) {
    let mut dropped = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let kept = items
        .into_iter()
        .filter(|item| {
            if seen.insert(item.id) {
                true
            } else {
                dropped.push(item.id);
                false
            }
        })
        .collect();
    (kept, dropped)
}

/// Check that every id in the sequence is unique.
pub fn ids_unique<'a>(items: impl IntoIterator<Item = &'a SharedItem>) -> bool {
    items.into_iter().map(|i| i.id).all_unique()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{MediaKind, SortKey, ThumbnailRef};

    fn item(id: u64, key: &str) -> SharedItem {
        Arc::new(ItemModel::new(
            ItemId::new(id),
            format!("Item {id}"),
            SortKey::new(key),
            ThumbnailRef::none(),
            MediaKind::Movie,
        ))
    }

    #[test]
    fn test_load_mode_limit() {
        assert_eq!(LoadMode::Full.limit(), None);
        assert_eq!(LoadMode::Limited(10).limit(), Some(10));
        assert!(LoadMode::Limited(3).is_limited());
    }

    #[test]
    fn test_summary_has_more() {
        assert!(CollectionSummary::new(10, 1400).has_more);
        assert!(!CollectionSummary::new(5, 5).has_more);
    }

    #[test]
    fn test_sort_stable_keeps_equal_keys_in_order() {
        let mut items = vec![item(1, "b"), item(2, "a"), item(3, "b"), item(4, "a")];
        sort_stable(&mut items);
        let ids: Vec<u64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_dedup_by_id() {
        let (kept, dropped) = dedup_by_id(vec![item(1, "a"), item(2, "b"), item(1, "c")]);
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, vec![ItemId::new(1)]);
        assert!(ids_unique(&kept));
    }
}

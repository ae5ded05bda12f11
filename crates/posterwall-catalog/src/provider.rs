//! Provider boundary.

use posterwall_core::{CollectionSummary, LoadMode, MediaKind, SharedItem};

use crate::error::CatalogError;

/// A resolved collection, ready to be ingested by a renderer.
#[derive(Debug, Clone, Default)]
pub struct FetchedCollection {
    /// Items in display order.
    pub items: Vec<SharedItem>,
    /// Number of items of this kind the provider holds.
    pub total_count: usize,
}

impl FetchedCollection {
    /// Create a fetched collection.
    pub fn new(items: Vec<SharedItem>, total_count: usize) -> Self {
        Self { items, total_count }
    }

    /// Number of items fetched.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was fetched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shown-versus-total summary for this fetch.
    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary::new(self.items.len(), self.total_count)
    }
}

/// Source of media collections.
///
/// Calls are synchronous from the caller's point of view: any I/O has
/// already happened by the time a `FetchedCollection` is returned.
pub trait CollectionProvider {
    /// Fetch the items of `kind`, ordered by sort key.
    ///
    /// `LoadMode::Limited(n)` may return just the first `n` items;
    /// `total_count` always reports the full size.
    fn fetch_collection(
        &self,
        kind: MediaKind,
        mode: LoadMode,
    ) -> Result<FetchedCollection, CatalogError>;

    /// Number of items of `kind`.
    fn total_count(&self, kind: MediaKind) -> Result<usize, CatalogError> {
        self.fetch_collection(kind, LoadMode::Limited(0))
            .map(|c| c.total_count)
    }
}

//! In-memory catalog backed by a JSON file.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use posterwall_core::{ItemModel, LoadMode, MediaKind, SharedItem, sort_stable};

use crate::error::CatalogError;
use crate::provider::{CollectionProvider, FetchedCollection};

/// Current on-disk catalog format version.
pub const CATALOG_VERSION: u32 = 1;

/// On-disk catalog layout.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    items: Vec<ItemModel>,
}

/// A media library held in memory.
///
/// Items of each kind are kept sorted by sort key, so every fetch hands
/// out the same ordering.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<SharedItem>,
    series: Vec<SharedItem>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from items, rejecting duplicate ids.
    pub fn from_items(items: impl IntoIterator<Item = ItemModel>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut catalog = Self::new();

        for item in items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId { id: item.id });
            }
            match item.kind {
                MediaKind::Movie => catalog.movies.push(Arc::new(item)),
                MediaKind::Series => catalog.series.push(Arc::new(item)),
            }
        }

        sort_stable(&mut catalog.movies);
        sort_stable(&mut catalog.series);
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let start = Instant::now();

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let file: CatalogFile = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if file.version != CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: file.version,
                expected: CATALOG_VERSION,
            });
        }

        let catalog = Self::from_items(file.items)?;
        tracing::info!(
            target: "catalog",
            path = %path.display(),
            movies = catalog.movies.len(),
            series = catalog.series.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Write the catalog to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let file = CatalogFile {
            version: CATALOG_VERSION,
            items: self.iter().map(|item| ItemModel::clone(item)).collect(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| CatalogError::io(path, e))?;

        tracing::info!(target: "catalog", path = %path.display(), items = self.len(), "catalog saved");
        Ok(())
    }

    /// Items of one kind, in display order.
    pub fn items(&self, kind: MediaKind) -> &[SharedItem] {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Series => &self.series,
        }
    }

    /// Iterate over every item, movies first.
    pub fn iter(&self) -> impl Iterator<Item = &SharedItem> {
        self.movies.iter().chain(self.series.iter())
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.movies.len() + self.series.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace one item with an edited copy, keeping its position.
    ///
    /// Returns the stored item, or `None` if no item has that id.
    pub fn update(&mut self, item: ItemModel) -> Option<SharedItem> {
        let list = match item.kind {
            MediaKind::Movie => &mut self.movies,
            MediaKind::Series => &mut self.series,
        };
        let slot = list.iter_mut().find(|existing| existing.id == item.id)?;
        *slot = Arc::new(item);
        let updated = Arc::clone(slot);
        // An edit may change the sort key
        sort_stable(list);
        Some(updated)
    }
}

impl CollectionProvider for Catalog {
    fn fetch_collection(
        &self,
        kind: MediaKind,
        mode: LoadMode,
    ) -> Result<FetchedCollection, CatalogError> {
        let all = self.items(kind);
        let take = mode.limit().unwrap_or(all.len()).min(all.len());
        tracing::debug!(target: "catalog", %kind, ?mode, take, total = all.len(), "fetch collection");
        Ok(FetchedCollection::new(all[..take].to_vec(), all.len()))
    }

    fn total_count(&self, kind: MediaKind) -> Result<usize, CatalogError> {
        Ok(self.items(kind).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posterwall_core::{ItemId, SortKey, ThumbnailRef};

    fn item(id: u64, kind: MediaKind, key: &str) -> ItemModel {
        ItemModel::new(
            ItemId::new(id),
            format!("Title {id}"),
            SortKey::new(key),
            ThumbnailRef::none(),
            kind,
        )
    }

    #[test]
    fn test_from_items_splits_and_sorts() {
        let catalog = Catalog::from_items(vec![
            item(1, MediaKind::Movie, "b"),
            item(2, MediaKind::Series, "a"),
            item(3, MediaKind::Movie, "a"),
        ])
        .unwrap();

        let movies: Vec<u64> = catalog.items(MediaKind::Movie).iter().map(|i| i.id.0).collect();
        assert_eq!(movies, vec![3, 1]);
        assert_eq!(catalog.items(MediaKind::Series).len(), 1);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let err = Catalog::from_items(vec![
            item(1, MediaKind::Movie, "a"),
            item(1, MediaKind::Series, "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn test_fetch_limited() {
        let catalog = Catalog::from_items((0..30).map(|i| item(i, MediaKind::Movie, &format!("{i:04}")))).unwrap();
        let fetched = catalog.fetch_collection(MediaKind::Movie, LoadMode::Limited(10)).unwrap();
        assert_eq!(fetched.len(), 10);
        assert_eq!(fetched.total_count, 30);
        assert!(fetched.summary().has_more);

        let empty = catalog.fetch_collection(MediaKind::Series, LoadMode::Full).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.total_count, 0);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut catalog = Catalog::from_items(vec![
            item(1, MediaKind::Movie, "a"),
            item(2, MediaKind::Movie, "b"),
        ])
        .unwrap();

        let edited = catalog.items(MediaKind::Movie)[0].with_watched(true);
        let stored = catalog.update(edited).unwrap();
        assert!(stored.flags.watched);
        assert!(catalog.items(MediaKind::Movie)[0].flags.watched);

        assert!(catalog.update(item(99, MediaKind::Movie, "z")).is_none());
    }
}

//! Deterministic synthetic libraries for demos and tests.

use chrono::{Days, NaiveDate};
use compact_str::format_compact;

use posterwall_core::{ItemFlags, ItemId, ItemModel, MediaKind, SortKey, ThumbnailRef};

use crate::catalog::Catalog;
use crate::error::CatalogError;

const ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Hidden", "Last", "Electric", "Broken", "Golden", "Northern", "Midnight",
    "Distant", "Hollow", "Burning", "Frozen", "Lonely", "Savage", "Quiet",
];

const NOUNS: &[&str] = &[
    "Harbor", "Signal", "Empire", "Garden", "Frontier", "Machine", "River", "Station", "Orchard",
    "Comet", "Archive", "Lantern", "Kingdom", "Canyon", "Mirror", "Tide",
];

const SERIES_STATUS: &[&str] = &["Returning Series", "Ended", "Canceled", "In Production"];

/// Series ids start here so they never collide with movie ids.
const SERIES_ID_BASE: u64 = 1_000_000;

/// Generator for a synthetic media library.
///
/// The same counts always produce the same catalog.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticLibrary {
    movies: usize,
    series: usize,
}

impl SyntheticLibrary {
    /// Create a generator for the given counts.
    pub fn new(movies: usize, series: usize) -> Self {
        Self { movies, series }
    }

    /// Generate the items.
    pub fn items(&self) -> Vec<ItemModel> {
        let movies = (0..self.movies).map(|i| synthetic_item(i, MediaKind::Movie));
        let series = (0..self.series).map(|i| synthetic_item(i, MediaKind::Series));
        movies.chain(series).collect()
    }

    /// Generate a catalog.
    pub fn build(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_items(self.items())
    }
}

fn synthetic_item(index: usize, kind: MediaKind) -> ItemModel {
    let n = index as u64;
    let id = match kind {
        MediaKind::Movie => ItemId::new(n + 1),
        MediaKind::Series => ItemId::new(SERIES_ID_BASE + n + 1),
    };

    let adjective = ADJECTIVES[index % ADJECTIVES.len()];
    let noun = NOUNS[(index / ADJECTIVES.len()) % NOUNS.len()];
    let cycle = index / (ADJECTIVES.len() * NOUNS.len());
    let title = if cycle == 0 {
        format_compact!("The {adjective} {noun}")
    } else {
        format_compact!("The {adjective} {noun} {}", cycle + 1)
    };

    // One release every few days, starting in 1970
    let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    let release = base
        .checked_add_days(Days::new(n * 11))
        .unwrap_or(base);

    let flags = ItemFlags {
        watched: index % 3 == 0,
        notifications: index % 4 == 0,
        new_release: index % 8 == 0,
        soon_release: index % 8 == 4,
        recent_change: index % 16 == 0,
        light_poster: index % 2 == 1,
    };

    let thumbnail = if index % 10 == 9 {
        ThumbnailRef::none()
    } else {
        ThumbnailRef::new(format_compact!("/posters/{kind}/{}.jpg", id.0))
    };

    let item = ItemModel::new(
        id,
        title,
        SortKey::new(format_compact!("{}", release.format("%Y-%m-%d"))),
        thumbnail,
        kind,
    )
    .with_release_date(release)
    .with_flags(flags);

    match kind {
        MediaKind::Movie => item.with_status("Released"),
        MediaKind::Series => item.with_status(SERIES_STATUS[index % SERIES_STATUS.len()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posterwall_core::ids_unique;

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = SyntheticLibrary::new(50, 20).items();
        let b = SyntheticLibrary::new(50, 20).items();
        assert_eq!(a, b);
        assert_eq!(a.len(), 70);
    }

    #[test]
    fn test_synthetic_ids_unique_across_kinds() {
        let catalog = SyntheticLibrary::new(1400, 300).build().unwrap();
        assert_eq!(catalog.items(MediaKind::Movie).len(), 1400);
        assert_eq!(catalog.items(MediaKind::Series).len(), 300);
        assert!(ids_unique(catalog.iter()));
    }

    #[test]
    fn test_synthetic_sorted_by_release() {
        let catalog = SyntheticLibrary::new(40, 0).build().unwrap();
        let keys: Vec<&str> = catalog
            .items(MediaKind::Movie)
            .iter()
            .map(|i| i.sort_key.as_str())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}

//! Media item types.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for an item within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new ItemId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordering value for an item.
///
/// Keys compare lexicographically, so ISO dates and zero-padded ranks sort
/// naturally. Collections are reordered stably: equal keys keep their
/// relative order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(pub CompactString);

impl SortKey {
    /// Create a new sort key.
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Where a thumbnail comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSource {
    /// Bundled with the application; can be shown immediately.
    Embedded,
    /// File on disk; needs an async load before it can be shown.
    File,
    /// No poster available.
    Missing,
}

/// Opaque handle to an item's poster image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThumbnailRef(pub CompactString);

impl ThumbnailRef {
    /// URI scheme for posters bundled with the application.
    pub const EMBEDDED_SCHEME: &'static str = "resource://";

    /// Create a new thumbnail reference.
    pub fn new(uri: impl Into<CompactString>) -> Self {
        Self(uri.into())
    }

    /// A reference to no poster at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Get the raw reference.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Classify where this thumbnail is loaded from.
    pub fn source(&self) -> ThumbnailSource {
        if self.0.is_empty() {
            ThumbnailSource::Missing
        } else if self.0.starts_with(Self::EMBEDDED_SCHEME) {
            ThumbnailSource::Embedded
        } else {
            ThumbnailSource::File
        }
    }
}

/// Kind of media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A single film.
    Movie,
    /// A TV series.
    Series,
}

impl MediaKind {
    /// Plural label used for collection headings.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// Per-item status flags shown as badges on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFlags {
    /// The user has watched this entry.
    pub watched: bool,
    /// Release notifications are enabled for this entry.
    pub notifications: bool,
    /// A new release came out.
    pub new_release: bool,
    /// A release is coming soon.
    pub soon_release: bool,
    /// Metadata changed recently.
    pub recent_change: bool,
    /// The poster is light, so badges use the light tone.
    pub light_poster: bool,
}

/// A single renderable media entry.
///
/// Items are shared between the provider and renderers through `Arc`, and
/// are never mutated once created. An edit produces a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemModel {
    /// Unique identifier within a collection.
    pub id: ItemId,

    /// Display title.
    pub title: CompactString,

    /// Ordering value.
    pub sort_key: SortKey,

    /// Poster reference.
    #[serde(default)]
    pub thumbnail: ThumbnailRef,

    /// Movie or series.
    pub kind: MediaKind,

    /// First release date, if known.
    #[serde(default)]
    pub release_date: Option<NaiveDate>,

    /// Production status ("Released", "Ended", ...).
    #[serde(default)]
    pub status: Option<CompactString>,

    /// Badge flags.
    #[serde(default)]
    pub flags: ItemFlags,
}

impl ItemModel {
    /// Create a new item with no release date, status, or flags.
    pub fn new(
        id: ItemId,
        title: impl Into<CompactString>,
        sort_key: SortKey,
        thumbnail: ThumbnailRef,
        kind: MediaKind,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            sort_key,
            thumbnail,
            kind,
            release_date: None,
            status: None,
            flags: ItemFlags::default(),
        }
    }

    /// Set the release date.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Set the production status.
    pub fn with_status(mut self, status: impl Into<CompactString>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the badge flags.
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Release year, if the release date is known.
    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// Copy of this item with the watched flag set to `watched`.
    pub fn with_watched(&self, watched: bool) -> Self {
        let mut item = self.clone();
        item.flags.watched = watched;
        item
    }

    /// Check if this is a movie.
    pub fn is_movie(&self) -> bool {
        self.kind == MediaKind::Movie
    }
}

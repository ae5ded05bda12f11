//! Core types and traits for posterwall.
//!
//! This crate provides the fundamental data structures shared by the
//! posterwall crates: media items, load modes, renderer events, error
//! taxonomy, and grid configuration.

mod collection;
mod config;
mod error;
mod event;
mod item;

pub use collection::{CollectionSummary, LoadMode, SharedItem, dedup_by_id, ids_unique, sort_stable};
pub use config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DEBOUNCE_WINDOW, DEFAULT_POOL_CAPACITY, GridConfig, GridConfigBuilder, MIN_ROW_EXTENT,
};
pub use error::{NavError, NavErrorPolicy, RenderError};
pub use event::{ActivationEvent, ExpandRequested, GridEvent, LayerId, RendererId};
pub use item::{ItemFlags, ItemId, ItemModel, MediaKind, SortKey, ThumbnailRef, ThumbnailSource};

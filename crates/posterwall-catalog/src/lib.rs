//! Collection providers for posterwall.
//!
//! Renderers never query storage themselves: a provider resolves a
//! collection up front and hands over ready-to-render items.
//!
//! # Overview
//!
//! - [`CollectionProvider`] is the boundary every provider implements.
//! - [`Catalog`] is an in-memory library that loads from and saves to JSON.
//! - [`SyntheticLibrary`] generates deterministic libraries for demos and tests.
//!
//! # Example
//!
//! ```rust
//! use posterwall_catalog::{CollectionProvider, SyntheticLibrary};
//! use posterwall_core::{LoadMode, MediaKind};
//!
//! let catalog = SyntheticLibrary::new(1400, 0).build().unwrap();
//! let preview = catalog.fetch_collection(MediaKind::Movie, LoadMode::Limited(10)).unwrap();
//!
//! assert_eq!(preview.items.len(), 10);
//! assert_eq!(preview.total_count, 1400);
//! ```

mod catalog;
mod error;
mod provider;
mod synthetic;

pub use catalog::{CATALOG_VERSION, Catalog};
pub use error::CatalogError;
pub use provider::{CollectionProvider, FetchedCollection};
pub use synthetic::SyntheticLibrary;

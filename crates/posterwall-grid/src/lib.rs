//! Virtualized poster grid for posterwall.
//!
//! # Overview
//!
//! `posterwall-grid` renders ordered collections of arbitrary size through a
//! fixed number of reusable card slots:
//!
//! - **Slot recycling** via [`RecyclingPool`], sized once at construction
//! - **Windowing** so only the visible rows (plus overscan) hold a slot
//! - **Chunked population** of large collections, cancelled by a newer ingest
//! - **Debounced activation** published on a per-renderer [`EventBus`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use posterwall_core::{GridConfig, GridEvent, ItemId, ItemModel, LoadMode, MediaKind, SortKey, ThumbnailRef};
//! use posterwall_grid::{ShellWidget, VirtualizedCollectionRenderer};
//!
//! let items = (0..100)
//!     .map(|i| Arc::new(ItemModel::new(
//!         ItemId::new(i),
//!         format!("Movie {i}"),
//!         SortKey::new(format!("{i:03}")),
//!         ThumbnailRef::none(),
//!         MediaKind::Movie,
//!     )))
//!     .collect();
//!
//! let mut grid = VirtualizedCollectionRenderer::<ShellWidget>::new(GridConfig::default());
//! let mut events = grid.subscribe();
//!
//! grid.set_viewport(0.0, 3.0).unwrap();
//! grid.ingest(items, LoadMode::Full).unwrap();
//! while grid.is_loading() {
//!     grid.tick().unwrap();
//! }
//!
//! assert!(grid.activate(0, Instant::now()).unwrap());
//! assert!(matches!(events.try_next(), Some(GridEvent::Activated(_))));
//! ```

mod batch;
mod bus;
mod debounce;
mod pool;
mod renderer;
mod widget;
mod window;

pub use batch::{LoadProgress, PendingLoadBatch};
pub use bus::{BusSubscription, EventBus};
pub use debounce::ActivationDebouncer;
pub use pool::{ActivationHandler, HandlerToken, PoolStats, RecyclingPool, RenderSlot};
pub use renderer::{PresentationState, RefreshStyle, TickOutcome, VirtualizedCollectionRenderer};
pub use widget::{Badge, BadgeTone, CardVisual, ShellWidget, SlotWidget};
pub use window::{CollectionWindow, WindowDiff, compute_window};

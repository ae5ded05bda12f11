//! Error types for rendering and navigation.

use thiserror::Error;

use crate::event::{LayerId, RendererId};

/// Errors raised by renderers and their slot pools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A load was superseded by a newer ingest.
    #[error("Stale load (generation {generation}) discarded")]
    StaleOperation { generation: u64 },

    /// Every slot is bound; the pool was sized too small.
    #[error("Slot pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// A bound slot was bound again without being unbound first.
    #[error("Slot {slot} is still bound")]
    SlotStillBound { slot: usize },

    /// An unbound slot was released or triggered.
    #[error("Slot {slot} is not bound")]
    SlotNotBound { slot: usize },

    /// A slot index outside the pool.
    #[error("No slot {slot} in pool")]
    UnknownSlot { slot: usize },

    /// The renderer was disposed.
    #[error("{renderer} is disposed")]
    Disposed { renderer: RendererId },
}

impl RenderError {
    /// Benign errors are logged and discarded; the rest are invariant violations.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::StaleOperation { .. } | Self::Disposed { .. })
    }
}

/// Errors raised by the navigation coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// No layer with this id exists.
    #[error("Unknown navigation layer: {layer}")]
    UnknownLayer { layer: LayerId },

    /// The layer holds only its root page.
    #[error("Navigation stack of {layer} has nothing to pop")]
    EmptyStack { layer: LayerId },

    /// The root layer lives for the whole session.
    #[error("The root navigation layer cannot be destroyed")]
    RootLayer,

    /// An event came from a renderer with no registered target layer.
    #[error("{renderer} is not registered with any layer")]
    UnregisteredRenderer { renderer: RendererId },
}

/// How navigation programming errors are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavErrorPolicy {
    /// Panic on the first error.
    Strict,
    /// Log a warning and carry on.
    Lenient,
}

impl Default for NavErrorPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

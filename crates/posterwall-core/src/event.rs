//! Events published by renderers.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::collection::SharedItem;

/// Identifier of a renderer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RendererId(pub u64);

impl RendererId {
    /// Create a new RendererId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "renderer-{}", self.0)
    }
}

/// Identifier of a navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Create a new LayerId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// A user activated an item card.
#[derive(Debug, Clone)]
pub struct ActivationEvent {
    /// Renderer whose card was activated.
    pub source: RendererId,
    /// The activated item.
    pub model: SharedItem,
    /// Monotonic time of the trigger.
    pub timestamp: Instant,
}

/// A user asked to see the full collection behind a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandRequested {
    /// Renderer showing the preview.
    pub source: RendererId,
}

/// Everything a renderer can publish on its bus.
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// An item card was activated.
    Activated(ActivationEvent),
    /// The "show all" affordance was used.
    ExpandRequested(ExpandRequested),
}

impl GridEvent {
    /// The renderer that published this event.
    pub fn source(&self) -> RendererId {
        match self {
            Self::Activated(e) => e.source,
            Self::ExpandRequested(e) => e.source,
        }
    }

    /// Event name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activated(_) => "activated",
            Self::ExpandRequested(_) => "expand_requested",
        }
    }
}

impl From<ActivationEvent> for GridEvent {
    fn from(event: ActivationEvent) -> Self {
        Self::Activated(event)
    }
}

impl From<ExpandRequested> for GridEvent {
    fn from(event: ExpandRequested) -> Self {
        Self::ExpandRequested(event)
    }
}

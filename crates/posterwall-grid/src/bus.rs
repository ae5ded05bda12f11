//! Per-renderer event channel.
//!
//! A renderer publishes [`GridEvent`]s without knowing who listens.
//! Consumers opt in with [`EventBus::subscribe`] and drain their
//! subscription on the same turn the event was published.

use tokio::sync::mpsc;

use posterwall_core::{GridEvent, RendererId};

/// Publish/subscribe channel scoped to one renderer.
#[derive(Debug)]
pub struct EventBus {
    owner: RendererId,
    subscribers: Vec<mpsc::UnboundedSender<GridEvent>>,
    published: u64,
}

impl EventBus {
    /// Create a bus owned by `owner`.
    pub fn new(owner: RendererId) -> Self {
        Self {
            owner,
            subscribers: Vec::new(),
            published: 0,
        }
    }

    /// Renderer that owns this bus.
    pub fn owner(&self) -> RendererId {
        self.owner
    }

    /// Register a new consumer.
    pub fn subscribe(&mut self) -> BusSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        BusSubscription {
            source: self.owner,
            rx,
        }
    }

    /// Deliver `event` once to every live subscriber.
    ///
    /// Subscribers whose receiving end was dropped are forgotten. Returns the
    /// number of subscribers that received the event.
    pub fn publish(&mut self, event: impl Into<GridEvent>) -> usize {
        let event = event.into();
        self.published += 1;
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());

        if self.subscribers.is_empty() {
            tracing::debug!(target: "bus", owner = %self.owner, event = event.name(), "event published with no subscribers");
        }
        self.subscribers.len()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Number of events published so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}

/// Receiving end of an [`EventBus`] subscription.
#[derive(Debug)]
pub struct BusSubscription {
    source: RendererId,
    rx: mpsc::UnboundedReceiver<GridEvent>,
}

impl BusSubscription {
    /// Renderer this subscription listens to.
    pub fn source(&self) -> RendererId {
        self.source
    }

    /// Take the next queued event, if any.
    pub fn try_next(&mut self) -> Option<GridEvent> {
        self.rx.try_recv().ok()
    }

    /// Take every queued event.
    pub fn drain(&mut self) -> Vec<GridEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Wait for the next event. Returns `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<GridEvent> {
        self.rx.recv().await
    }
}

//! Fixed-capacity pool of reusable card slots.

use std::collections::VecDeque;
use std::time::Instant;

use posterwall_core::{ActivationEvent, ItemId, RenderError, RendererId, SharedItem};

use crate::bus::EventBus;
use crate::widget::{CardVisual, SlotWidget};

/// Identifies one handler connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerToken(pub u64);

/// Activation handler attached to a bound slot.
///
/// Firing it publishes an [`ActivationEvent`] for the item the slot showed
/// when the handler was connected.
#[derive(Debug, Clone)]
pub struct ActivationHandler {
    token: HandlerToken,
    source: RendererId,
    model: SharedItem,
}

impl ActivationHandler {
    pub fn token(&self) -> HandlerToken {
        self.token
    }

    pub fn model(&self) -> &SharedItem {
        &self.model
    }

    fn fire(&self, bus: &mut EventBus, timestamp: Instant) -> usize {
        bus.publish(ActivationEvent {
            source: self.source,
            model: self.model.clone(),
            timestamp,
        })
    }
}

/// A reusable widget plus its current binding.
#[derive(Debug)]
pub struct RenderSlot<W> {
    index: usize,
    widget: W,
    bound_model: Option<SharedItem>,
    position: Option<usize>,
    handler: Option<ActivationHandler>,
}

impl<W> RenderSlot<W> {
    /// Slot index within the pool.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Item currently presented.
    pub fn bound_model(&self) -> Option<&SharedItem> {
        self.bound_model.as_ref()
    }

    pub fn bound_id(&self) -> Option<ItemId> {
        self.bound_model.as_ref().map(|m| m.id)
    }

    /// Collection index of the bound item.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn handler_token(&self) -> Option<HandlerToken> {
        self.handler.as_ref().map(ActivationHandler::token)
    }

    pub fn is_bound(&self) -> bool {
        self.bound_model.is_some()
    }
}

/// Lifetime counters for a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub binds: u64,
    pub unbinds: u64,
    pub handlers_connected: u64,
    pub handlers_disconnected: u64,
    /// Acquire calls that found no free slot.
    pub exhausted: u64,
}

impl PoolStats {
    /// Handlers connected and not yet disconnected.
    pub fn live_handlers(&self) -> u64 {
        self.handlers_connected - self.handlers_disconnected
    }
}

/// Pool of slots created once and rebound as the window moves.
#[derive(Debug)]
pub struct RecyclingPool<W> {
    owner: RendererId,
    slots: Vec<RenderSlot<W>>,
    free: VecDeque<usize>,
    next_token: u64,
    stats: PoolStats,
}

impl<W: SlotWidget> RecyclingPool<W> {
    /// Create `capacity` unbound slots.
    pub fn new(owner: RendererId, capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|index| RenderSlot {
                index,
                widget: W::create(),
                bound_model: None,
                position: None,
                handler: None,
            })
            .collect();

        Self {
            owner,
            slots,
            free: (0..capacity).collect(),
            next_token: 0,
            stats: PoolStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots ready to be acquired.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn in_use(&self) -> usize {
        self.capacity() - self.available()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Take a free slot.
    pub fn acquire(&mut self) -> Result<usize, RenderError> {
        match self.free.pop_front() {
            Some(slot) => Ok(slot),
            None => {
                self.stats.exhausted += 1;
                tracing::warn!(target: "pool", owner = %self.owner, capacity = self.capacity(), "no free slot");
                Err(RenderError::PoolExhausted {
                    capacity: self.capacity(),
                })
            }
        }
    }

    /// Present `model` in `slot` and connect its activation handler.
    ///
    /// The slot must be unbound.
    pub fn bind(&mut self, slot: usize, model: SharedItem, position: usize) -> Result<(), RenderError> {
        let token = HandlerToken(self.next_token);
        let source = self.owner;
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(RenderError::UnknownSlot { slot })?;
        if entry.is_bound() {
            return Err(RenderError::SlotStillBound { slot });
        }

        let visual = CardVisual::from_model(&model);
        entry.widget.bind(&model, &visual);
        entry.handler = Some(ActivationHandler {
            token,
            source,
            model: model.clone(),
        });
        entry.bound_model = Some(model);
        entry.position = Some(position);

        self.next_token += 1;
        self.stats.binds += 1;
        self.stats.handlers_connected += 1;
        Ok(())
    }

    /// Disconnect the handler of `slot` and blank it.
    pub fn unbind(&mut self, slot: usize) -> Result<(), RenderError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(RenderError::UnknownSlot { slot })?;
        if !entry.is_bound() {
            return Err(RenderError::SlotNotBound { slot });
        }

        // Handler goes before the model so a stale trigger finds nothing.
        if entry.handler.take().is_some() {
            self.stats.handlers_disconnected += 1;
        }
        entry.bound_model = None;
        entry.position = None;
        entry.widget.unbind();

        self.stats.unbinds += 1;
        Ok(())
    }

    /// Unbind `slot` if needed and return it to the free list.
    pub fn release(&mut self, slot: usize) -> Result<(), RenderError> {
        let bound = self
            .slots
            .get(slot)
            .ok_or(RenderError::UnknownSlot { slot })?
            .is_bound();
        if bound {
            self.unbind(slot)?;
        }
        if !self.free.contains(&slot) {
            self.free.push_back(slot);
        }
        Ok(())
    }

    /// Release every slot.
    pub fn release_all(&mut self) {
        for slot in 0..self.slots.len() {
            // Indices come from our own range
            let _ = self.release(slot);
        }
    }

    /// Fire the handler of `slot`.
    ///
    /// Returns the number of subscribers the event reached.
    pub fn trigger(&self, slot: usize, bus: &mut EventBus, timestamp: Instant) -> Result<usize, RenderError> {
        let entry = self.slots.get(slot).ok_or(RenderError::UnknownSlot { slot })?;
        let handler = entry.handler.as_ref().ok_or(RenderError::SlotNotBound { slot })?;
        Ok(handler.fire(bus, timestamp))
    }

    pub fn slot(&self, slot: usize) -> Option<&RenderSlot<W>> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = &RenderSlot<W>> {
        self.slots.iter()
    }

    /// Slots currently presenting an item.
    pub fn bound(&self) -> impl Iterator<Item = &RenderSlot<W>> {
        self.slots.iter().filter(|s| s.is_bound())
    }

    /// Count of slots with a connected handler.
    pub fn connected_handlers(&self) -> usize {
        self.slots.iter().filter(|s| s.handler.is_some()).count()
    }
}

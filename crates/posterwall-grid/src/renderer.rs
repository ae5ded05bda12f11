//! Virtualized collection renderer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use posterwall_core::{
    CollectionSummary, ExpandRequested, GridConfig, ItemId, LoadMode, RenderError, RendererId,
    SharedItem, dedup_by_id,
};

use crate::batch::{LoadProgress, PendingLoadBatch};
use crate::bus::{BusSubscription, EventBus};
use crate::debounce::ActivationDebouncer;
use crate::pool::{RecyclingPool, RenderSlot};
use crate::widget::SlotWidget;
use crate::window::{CollectionWindow, WindowDiff, compute_window};

static NEXT_RENDERER_ID: AtomicU64 = AtomicU64::new(1);

/// What the host should show for a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    /// Population in progress.
    Loading,
    /// Nothing to show.
    Empty,
    /// Cards are available.
    Filled,
}

/// How a refresh presents itself while repopulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStyle {
    /// Switch to the loading state until population completes.
    #[default]
    ShowLoading,
    /// Keep the current state.
    Silent,
}

/// Result of one population tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No population in progress.
    Idle,
    /// A chunk was appended.
    Appended { appended: usize, loaded: usize },
    /// The last chunk was appended.
    Completed { loaded: usize },
}

/// Renders an ordered collection through a fixed pool of card slots.
///
/// Only the indices inside the visible window hold a slot. Large
/// collections are appended in chunks on successive [`tick`](Self::tick)
/// calls, and a new ingest cancels any population still running.
pub struct VirtualizedCollectionRenderer<W> {
    id: RendererId,
    config: GridConfig,
    items: Vec<SharedItem>,
    mode: LoadMode,
    summary: CollectionSummary,
    pool: RecyclingPool<W>,
    /// Collection index to slot index.
    assignments: BTreeMap<usize, usize>,
    window: CollectionWindow,
    scroll_offset: f32,
    viewport_extent: f32,
    pending: Option<PendingLoadBatch>,
    generation: u64,
    debouncer: ActivationDebouncer,
    bus: EventBus,
    state: PresentationState,
    disposed: bool,
}

impl<W: SlotWidget> VirtualizedCollectionRenderer<W> {
    /// Create a renderer with a fresh id.
    pub fn new(config: GridConfig) -> Self {
        let id = RendererId::new(NEXT_RENDERER_ID.fetch_add(1, Ordering::Relaxed));
        Self::with_id(id, config)
    }

    /// Create a renderer with the given id.
    pub fn with_id(id: RendererId, config: GridConfig) -> Self {
        Self {
            id,
            pool: RecyclingPool::new(id, config.pool_capacity),
            debouncer: ActivationDebouncer::new(config.debounce_window),
            bus: EventBus::new(id),
            config,
            items: Vec::new(),
            mode: LoadMode::Full,
            summary: CollectionSummary::default(),
            assignments: BTreeMap::new(),
            window: CollectionWindow::default(),
            scroll_offset: 0.0,
            viewport_extent: 0.0,
            pending: None,
            generation: 0,
            state: PresentationState::Empty,
            disposed: false,
        }
    }

    pub fn id(&self) -> RendererId {
        self.id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Items appended so far, in order.
    pub fn items(&self) -> &[SharedItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&SharedItem> {
        self.items.get(index)
    }

    /// Collection index of the item with `id`.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Number of items appended so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn summary(&self) -> CollectionSummary {
        self.summary
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn window(&self) -> CollectionWindow {
        self.window
    }

    pub fn pool(&self) -> &RecyclingPool<W> {
        &self.pool
    }

    /// Current ingest generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Progress of the running population.
    pub fn progress(&self) -> Option<LoadProgress> {
        self.pending.as_ref().map(PendingLoadBatch::progress)
    }

    /// Cancellation handle of the running population.
    pub fn load_handle(&self) -> Option<CancellationToken> {
        self.pending.as_ref().map(PendingLoadBatch::cancel_handle)
    }

    /// Listen to this renderer's events.
    pub fn subscribe(&mut self) -> BusSubscription {
        self.bus.subscribe()
    }

    /// Replace the collection.
    ///
    /// The total count is the number of unique items given.
    pub fn ingest(&mut self, items: Vec<SharedItem>, mode: LoadMode) -> Result<CollectionSummary, RenderError> {
        self.populate_from(items, None, mode, RefreshStyle::ShowLoading)
    }

    /// Replace the collection with items a provider already truncated.
    pub fn ingest_with_total(
        &mut self,
        items: Vec<SharedItem>,
        total_count: usize,
        mode: LoadMode,
    ) -> Result<CollectionSummary, RenderError> {
        self.populate_from(items, Some(total_count), mode, RefreshStyle::ShowLoading)
    }

    /// Replace the collection, choosing how the reload presents itself.
    pub fn refresh(
        &mut self,
        items: Vec<SharedItem>,
        total_count: Option<usize>,
        mode: LoadMode,
        style: RefreshStyle,
    ) -> Result<CollectionSummary, RenderError> {
        self.populate_from(items, total_count, mode, style)
    }

    fn populate_from(
        &mut self,
        items: Vec<SharedItem>,
        total_count: Option<usize>,
        mode: LoadMode,
        style: RefreshStyle,
    ) -> Result<CollectionSummary, RenderError> {
        if self.disposed {
            tracing::warn!(target: "grid", renderer = %self.id, "ingest on disposed renderer ignored");
            return Err(RenderError::Disposed { renderer: self.id });
        }

        // The presentation state survives until the new load settles it.
        let previous = self.state;
        self.cancel_pending();
        self.state = previous;
        self.release_window()?;
        self.items.clear();
        self.generation += 1;

        let (mut unique, dropped) = dedup_by_id(items);
        if !dropped.is_empty() {
            tracing::warn!(target: "grid", renderer = %self.id, dropped = dropped.len(), "duplicate item ids dropped");
        }
        let total = total_count.unwrap_or(0).max(unique.len());
        if let Some(limit) = mode.limit() {
            unique.truncate(limit);
        }
        self.mode = mode;
        self.summary = CollectionSummary::new(unique.len(), total);

        if unique.len() <= self.config.sync_threshold() {
            self.items = unique;
            self.settle_state();
            self.sync_window()?;
        } else {
            if style == RefreshStyle::ShowLoading {
                self.state = PresentationState::Loading;
            }
            self.pending = Some(PendingLoadBatch::new(unique, self.config.chunk_size, self.generation));
        }

        tracing::info!(
            target: "grid",
            renderer = %self.id,
            generation = self.generation,
            shown = self.summary.shown,
            total = self.summary.total_count,
            chunked = self.pending.is_some(),
            "collection ingested"
        );
        Ok(self.summary)
    }

    /// Append the next chunk of a running population.
    pub fn tick(&mut self) -> Result<TickOutcome, RenderError> {
        let Some(batch) = self.pending.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        if batch.is_cancelled() {
            tracing::debug!(target: "grid", renderer = %self.id, generation = batch.generation(), "cancelled batch discarded");
            self.pending = None;
            self.settle_state();
            return Ok(TickOutcome::Idle);
        }

        let appended = match batch.next_chunk() {
            Some(chunk) => {
                self.items.extend_from_slice(chunk);
                chunk.len()
            }
            None => 0,
        };
        let complete = batch.is_complete();
        let progress = batch.progress();

        self.sync_window()?;

        if complete {
            self.pending = None;
            self.settle_state();
            tracing::info!(
                target: "grid",
                renderer = %self.id,
                loaded = self.items.len(),
                chunks = progress.chunks,
                elapsed_ms = progress.elapsed.as_millis() as u64,
                "population complete"
            );
            Ok(TickOutcome::Completed {
                loaded: self.items.len(),
            })
        } else {
            Ok(TickOutcome::Appended {
                appended,
                loaded: self.items.len(),
            })
        }
    }

    /// Tick on behalf of a host that scheduled work for `generation`.
    pub fn tick_generation(&mut self, generation: u64) -> Result<TickOutcome, RenderError> {
        if generation != self.generation {
            return Err(RenderError::StaleOperation { generation });
        }
        self.tick()
    }

    /// Drive the running population to completion, yielding between chunks.
    pub async fn populate(&mut self) -> Result<usize, RenderError> {
        while let TickOutcome::Appended { .. } = self.tick()? {
            tokio::task::yield_now().await;
        }
        Ok(self.items.len())
    }

    /// Stop the running population. Returns whether one was running.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(batch) => {
                batch.cancel();
                tracing::debug!(
                    target: "grid",
                    renderer = %self.id,
                    generation = batch.generation(),
                    remaining = batch.remaining(),
                    "population cancelled"
                );
                self.settle_state();
                true
            }
            None => false,
        }
    }

    fn settle_state(&mut self) {
        self.state = if self.items.is_empty() {
            PresentationState::Empty
        } else {
            PresentationState::Filled
        };
    }

    /// Window for a viewport, without applying it.
    pub fn compute_window(&self, scroll_offset: f32, viewport_extent: f32) -> CollectionWindow {
        compute_window(self.items.len(), scroll_offset, viewport_extent, &self.config)
    }

    /// Move the viewport and rebind slots to match.
    pub fn set_viewport(&mut self, scroll_offset: f32, viewport_extent: f32) -> Result<WindowDiff, RenderError> {
        self.scroll_offset = scroll_offset;
        self.viewport_extent = viewport_extent;
        self.sync_window()
    }

    /// Unbind leaving indices first, then bind entering ones.
    fn sync_window(&mut self) -> Result<WindowDiff, RenderError> {
        let window = self.compute_window(self.scroll_offset, self.viewport_extent);

        let leaving: Vec<usize> = self
            .assignments
            .keys()
            .copied()
            .filter(|index| !window.contains(*index))
            .collect();
        for index in &leaving {
            if let Some(slot) = self.assignments.remove(index) {
                self.pool.release(slot)?;
            }
        }

        let mut entering = Vec::new();
        for index in window.range() {
            if self.assignments.contains_key(&index) {
                continue;
            }
            let slot = self.pool.acquire()?;
            self.pool.bind(slot, self.items[index].clone(), index)?;
            self.assignments.insert(index, slot);
            entering.push(index);
        }

        self.window = window;
        let diff = WindowDiff { entering, leaving };
        if !diff.is_empty() {
            tracing::trace!(
                target: "grid",
                renderer = %self.id,
                first = window.first,
                count = window.count,
                entering = diff.entering.len(),
                leaving = diff.leaving.len(),
                "window moved"
            );
        }
        Ok(diff)
    }

    fn release_window(&mut self) -> Result<(), RenderError> {
        for (_, slot) in std::mem::take(&mut self.assignments) {
            self.pool.release(slot)?;
        }
        self.window = CollectionWindow::default();
        Ok(())
    }

    /// Slot presenting collection index `index`.
    pub fn slot_for(&self, index: usize) -> Option<&RenderSlot<W>> {
        self.assignments.get(&index).and_then(|&slot| self.pool.slot(slot))
    }

    /// Bound slots in collection order.
    pub fn bound_cards(&self) -> impl Iterator<Item = (usize, &RenderSlot<W>)> {
        self.assignments
            .iter()
            .filter_map(|(&index, &slot)| self.pool.slot(slot).map(|s| (index, s)))
    }

    /// Activate the card showing collection index `index`.
    ///
    /// Returns whether an event was published. Indices outside the window
    /// and debounced repeats publish nothing.
    pub fn activate(&mut self, index: usize, now: Instant) -> Result<bool, RenderError> {
        match self.assignments.get(&index) {
            Some(&slot) => self.activate_slot(slot, now),
            None => {
                tracing::debug!(target: "grid", renderer = %self.id, index, "activation outside window ignored");
                Ok(false)
            }
        }
    }

    /// Activate pool slot `slot`.
    pub fn activate_slot(&mut self, slot: usize, now: Instant) -> Result<bool, RenderError> {
        if self.disposed {
            return Err(RenderError::Disposed { renderer: self.id });
        }
        let bound = self
            .pool
            .slot(slot)
            .ok_or(RenderError::UnknownSlot { slot })?
            .is_bound();
        if !bound {
            return Err(RenderError::SlotNotBound { slot });
        }
        if !self.debouncer.admit(now) {
            tracing::debug!(target: "grid", renderer = %self.id, slot, "activation debounced");
            return Ok(false);
        }

        self.pool.trigger(slot, &mut self.bus, now)?;
        Ok(true)
    }

    /// Ask for the full collection behind a preview.
    ///
    /// Only previews publish; returns whether an event was published.
    pub fn request_expand(&mut self) -> bool {
        if !self.mode.is_limited() || self.disposed {
            return false;
        }
        self.bus.publish(ExpandRequested { source: self.id });
        true
    }

    /// Label for the expand affordance of a preview.
    pub fn expand_label(&self) -> Option<String> {
        self.mode
            .is_limited()
            .then(|| format!("Show All ({})", self.summary.total_count))
    }

    /// Release every slot and stop all work. Later ingests are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending();
        self.assignments.clear();
        self.pool.release_all();
        self.items.clear();
        self.window = CollectionWindow::default();
        self.state = PresentationState::Empty;
        self.disposed = true;
        tracing::info!(target: "grid", renderer = %self.id, "renderer disposed");
    }
}

impl<W> Drop for VirtualizedCollectionRenderer<W> {
    fn drop(&mut self) {
        if let Some(batch) = &self.pending {
            batch.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::ShellWidget;
    use posterwall_core::{ItemModel, MediaKind, SortKey, ThumbnailRef};
    use std::sync::Arc;

    fn items(n: u64) -> Vec<SharedItem> {
        (0..n)
            .map(|i| {
                Arc::new(ItemModel::new(
                    ItemId::new(i),
                    format!("Title {i}"),
                    SortKey::new(format!("{i:05}")),
                    ThumbnailRef::none(),
                    MediaKind::Movie,
                ))
            })
            .collect()
    }

    fn renderer() -> VirtualizedCollectionRenderer<ShellWidget> {
        VirtualizedCollectionRenderer::with_id(RendererId::new(1), GridConfig::default())
    }

    #[test]
    fn test_small_collection_inserted_at_once() {
        let mut grid = renderer();
        grid.set_viewport(0.0, 2.0).unwrap();
        grid.ingest(items(12), LoadMode::Full).unwrap();

        assert_eq!(grid.len(), 12);
        assert!(!grid.is_loading());
        assert_eq!(grid.state(), PresentationState::Filled);
        assert_eq!(grid.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn test_empty_ingest_is_empty_state() {
        let mut grid = renderer();
        let summary = grid.ingest(Vec::new(), LoadMode::Full).unwrap();
        assert_eq!(summary.total_count, 0);
        assert_eq!(grid.state(), PresentationState::Empty);
    }

    #[test]
    fn test_duplicates_dropped() {
        let mut grid = renderer();
        let mut list = items(5);
        list.push(list[0].clone());
        let summary = grid.ingest(list, LoadMode::Full).unwrap();
        assert_eq!(summary.shown, 5);
        assert_eq!(summary.total_count, 5);
    }

    #[test]
    fn test_stale_generation_rejected() {
        let mut grid = renderer();
        grid.ingest(items(100), LoadMode::Full).unwrap();
        let old = grid.generation();
        grid.ingest(items(100), LoadMode::Full).unwrap();

        assert_eq!(
            grid.tick_generation(old),
            Err(RenderError::StaleOperation { generation: old })
        );
        assert!(grid.tick_generation(grid.generation()).is_ok());
    }

    #[test]
    fn test_silent_refresh_keeps_state() {
        let mut grid = renderer();
        grid.ingest(items(10), LoadMode::Full).unwrap();
        assert_eq!(grid.state(), PresentationState::Filled);

        grid.refresh(items(200), None, LoadMode::Full, RefreshStyle::Silent)
            .unwrap();
        assert_eq!(grid.state(), PresentationState::Filled);

        grid.refresh(items(200), None, LoadMode::Full, RefreshStyle::ShowLoading)
            .unwrap();
        assert_eq!(grid.state(), PresentationState::Loading);
    }

    #[test]
    fn test_silent_refresh_while_loading_stays_loading() {
        let mut grid = renderer();
        grid.ingest(items(1400), LoadMode::Full).unwrap();
        grid.tick().unwrap();
        assert_eq!(grid.state(), PresentationState::Loading);

        grid.refresh(items(1400), None, LoadMode::Full, RefreshStyle::Silent)
            .unwrap();
        assert_eq!(grid.state(), PresentationState::Loading);
        assert!(grid.is_loading());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_expand_only_for_previews() {
        let mut grid = renderer();
        let mut sub = grid.subscribe();

        grid.ingest(items(30), LoadMode::Full).unwrap();
        assert!(grid.expand_label().is_none());
        assert!(!grid.request_expand());

        grid.ingest_with_total(items(10), 1400, LoadMode::Limited(10))
            .unwrap();
        assert_eq!(grid.expand_label().as_deref(), Some("Show All (1400)"));
        assert!(grid.request_expand());
        assert_eq!(sub.drain().len(), 1);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut grid = renderer();
        grid.set_viewport(0.0, 3.0).unwrap();
        grid.ingest(items(500), LoadMode::Full).unwrap();
        grid.tick().unwrap();
        assert!(grid.pool().in_use() > 0);

        grid.dispose();
        assert_eq!(grid.pool().in_use(), 0);
        assert_eq!(grid.pool().connected_handlers(), 0);
        assert!(!grid.is_loading());

        let err = grid.ingest(items(3), LoadMode::Full).unwrap_err();
        assert!(err.is_benign());
    }
}

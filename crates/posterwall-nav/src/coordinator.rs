//! Layer tree ownership and event routing.

use compact_str::CompactString;
use indexmap::IndexMap;

use posterwall_core::{ActivationEvent, GridEvent, LayerId, NavError, NavErrorPolicy, RendererId};
use posterwall_grid::BusSubscription;

use crate::layer::{LayerHost, LayerState, NavigationLayer};
use crate::page::{NavigationPage, PageId};

/// Header region the host should draw for one visible layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub layer: LayerId,
    pub title: CompactString,
    pub back_visible: bool,
    /// Number of ancestor layers.
    pub nesting: usize,
}

/// What routing a bus event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A page was pushed for an activation.
    Pushed {
        layer: LayerId,
        page: PageId,
        depth: usize,
    },
    /// A preview asked to be expanded; the host decides what to show.
    Expand { layer: LayerId, source: RendererId },
}

#[derive(Debug)]
struct Route {
    layer: LayerId,
    events: BusSubscription,
}

/// Owns the layer tree and routes renderer events to layers.
///
/// Every renderer is registered with one target layer up front. Routing
/// never depends on where the renderer sits in the host's view tree.
#[derive(Debug)]
pub struct NavigationCoordinator<V> {
    layers: IndexMap<LayerId, NavigationLayer<V>>,
    root: LayerId,
    next_layer: u64,
    routes: IndexMap<RendererId, Route>,
    policy: NavErrorPolicy,
}

impl<V> NavigationCoordinator<V> {
    /// Create a coordinator whose root layer shows `content`.
    pub fn new(content: V, title: impl Into<CompactString>) -> Self {
        let root = LayerId::new(0);
        let mut layers = IndexMap::new();
        layers.insert(
            root,
            NavigationLayer::new(root, NavigationPage::new(content, title, root), None),
        );

        Self {
            layers,
            root,
            next_layer: 1,
            routes: IndexMap::new(),
            policy: NavErrorPolicy::default(),
        }
    }

    /// Set how [`apply_policy`](Self::apply_policy) treats errors.
    pub fn with_policy(mut self, policy: NavErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> NavErrorPolicy {
        self.policy
    }

    /// The session-long root layer.
    pub fn root(&self) -> LayerId {
        self.root
    }

    pub fn layer(&self, layer: LayerId) -> Option<&NavigationLayer<V>> {
        self.layers.get(&layer)
    }

    /// Layers in creation order; parents come before their children.
    pub fn layers(&self) -> impl Iterator<Item = &NavigationLayer<V>> {
        self.layers.values()
    }

    fn get(&self, layer: LayerId) -> Result<&NavigationLayer<V>, NavError> {
        self.layers.get(&layer).ok_or(NavError::UnknownLayer { layer })
    }

    fn get_mut(&mut self, layer: LayerId) -> Result<&mut NavigationLayer<V>, NavError> {
        self.layers.get_mut(&layer).ok_or(NavError::UnknownLayer { layer })
    }

    /// Mount a child layer inside `host_page` of `parent`.
    pub fn create_layer(
        &mut self,
        parent: LayerId,
        host_page: PageId,
        content: V,
        title: impl Into<CompactString>,
    ) -> Result<LayerId, NavError> {
        self.get(parent)?;

        let id = LayerId::new(self.next_layer);
        self.next_layer += 1;
        let host = LayerHost {
            layer: parent,
            page: host_page,
        };
        self.layers
            .insert(id, NavigationLayer::new(id, NavigationPage::new(content, title, id), Some(host)));

        tracing::info!(target: "nav", layer = %id, parent = %parent, page = %host_page, "layer created");
        Ok(id)
    }

    /// Unmount `layer` and every layer nested in it.
    ///
    /// Their pages are discarded and renderers routed to them are
    /// unregistered. Returns the number of pages discarded.
    pub fn destroy_layer(&mut self, layer: LayerId) -> Result<usize, NavError> {
        if layer == self.root {
            return Err(NavError::RootLayer);
        }
        self.get(layer)?;

        let mut doomed = vec![layer];
        loop {
            let before = doomed.len();
            for candidate in self.layers.values() {
                let nested = candidate
                    .parent()
                    .is_some_and(|host| doomed.contains(&host.layer));
                if nested && !doomed.contains(&candidate.id()) {
                    doomed.push(candidate.id());
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        let discarded = doomed
            .iter()
            .filter_map(|id| self.layers.shift_remove(id))
            .map(|removed| removed.pages().len())
            .sum();
        self.routes.retain(|_, route| !doomed.contains(&route.layer));

        tracing::info!(target: "nav", layer = %layer, layers = doomed.len(), pages = discarded, "layer destroyed");
        Ok(discarded)
    }

    /// Destroy child layers mounted in any of `pages` of `layer`.
    fn unmount_hosted(&mut self, layer: LayerId, pages: &[PageId]) {
        let hosted: Vec<LayerId> = self
            .layers
            .values()
            .filter(|l| {
                l.parent()
                    .is_some_and(|host| host.layer == layer && pages.contains(&host.page))
            })
            .map(NavigationLayer::id)
            .collect();
        for child in hosted {
            // An earlier iteration may already have removed it as a descendant
            if self.layers.contains_key(&child) {
                let _ = self.destroy_layer(child);
            }
        }
    }

    /// Push `page` onto `layer`. Returns the new depth.
    pub fn push(&mut self, layer: LayerId, page: NavigationPage<V>) -> Result<usize, NavError> {
        let page_id = page.id();
        let depth = self.get_mut(layer)?.push(page);
        tracing::debug!(target: "nav", layer = %layer, page = %page_id, depth, "page pushed");
        Ok(depth)
    }

    /// Pop the top page of `layer`.
    pub fn pop(&mut self, layer: LayerId) -> Result<NavigationPage<V>, NavError> {
        let page = self
            .get_mut(layer)?
            .pop()
            .ok_or(NavError::EmptyStack { layer })?;
        self.unmount_hosted(layer, &[page.id()]);

        tracing::debug!(target: "nav", layer = %layer, page = %page.id(), "page popped");
        Ok(page)
    }

    /// Substitute the whole stack of `layer` in one step.
    ///
    /// Child layers mounted in pages that did not survive are destroyed.
    pub fn replace(&mut self, layer: LayerId, pages: Vec<NavigationPage<V>>) -> Result<(), NavError> {
        self.get(layer)?;
        if pages.is_empty() {
            return Err(NavError::EmptyStack { layer });
        }

        let depth = pages.len() - 1;
        let old = self.get_mut(layer)?.replace(pages);
        let current = self.get(layer)?;
        let gone: Vec<PageId> = old
            .iter()
            .map(NavigationPage::id)
            .filter(|id| !current.contains(*id))
            .collect();
        self.unmount_hosted(layer, &gone);

        tracing::debug!(target: "nav", layer = %layer, depth, "stack replaced");
        Ok(())
    }

    pub fn top_page(&self, layer: LayerId) -> Result<&NavigationPage<V>, NavError> {
        Ok(self.get(layer)?.top())
    }

    pub fn top_page_mut(&mut self, layer: LayerId) -> Result<&mut NavigationPage<V>, NavError> {
        Ok(self.get_mut(layer)?.top_mut())
    }

    pub fn state(&self, layer: LayerId) -> Result<LayerState, NavError> {
        Ok(self.get(layer)?.state())
    }

    /// Back affordance visibility for `layer`. Unknown layers have none.
    pub fn can_go_back(&self, layer: LayerId) -> bool {
        self.layers.get(&layer).is_some_and(NavigationLayer::can_go_back)
    }

    /// Hide or show a layer, e.g. an inactive tab.
    pub fn set_hidden(&mut self, layer: LayerId, hidden: bool) -> Result<(), NavError> {
        self.get_mut(layer)?.set_hidden(hidden);
        Ok(())
    }

    /// A layer is visible when it is not hidden, its host page is on top of
    /// its parent, and its parent is visible.
    pub fn is_visible(&self, layer: LayerId) -> bool {
        let mut current = layer;
        loop {
            let Some(entry) = self.layers.get(&current) else {
                return false;
            };
            if entry.is_hidden() {
                return false;
            }
            match entry.parent() {
                None => return true,
                Some(host) => match self.layers.get(&host.layer) {
                    Some(parent) if parent.top().id() == host.page => current = host.layer,
                    _ => return false,
                },
            }
        }
    }

    fn nesting(&self, layer: LayerId) -> usize {
        let mut nesting = 0;
        let mut current = self.layers.get(&layer).and_then(NavigationLayer::parent);
        while let Some(host) = current {
            nesting += 1;
            current = self.layers.get(&host.layer).and_then(NavigationLayer::parent);
        }
        nesting
    }

    /// Topmost ancestor of `layer`.
    pub fn outermost_layer(&self, layer: LayerId) -> Result<LayerId, NavError> {
        let mut current = self.get(layer)?;
        while let Some(host) = current.parent() {
            current = self.get(host.layer)?;
        }
        Ok(current.id())
    }

    /// Headers of every visible layer, outermost first.
    pub fn visible_chrome(&self) -> Vec<Chrome> {
        self.layers
            .values()
            .filter(|layer| self.is_visible(layer.id()))
            .map(|layer| Chrome {
                layer: layer.id(),
                title: layer.top().title.clone(),
                back_visible: layer.can_go_back(),
                nesting: self.nesting(layer.id()),
            })
            .collect()
    }

    /// Innermost visible layer that can go back.
    pub fn back_target(&self) -> Option<LayerId> {
        self.layers
            .values()
            .filter(|layer| layer.can_go_back() && self.is_visible(layer.id()))
            .max_by_key(|layer| self.nesting(layer.id()))
            .map(NavigationLayer::id)
    }

    /// Pop the innermost visible layer that can go back.
    pub fn back(&mut self) -> Result<NavigationPage<V>, NavError> {
        let layer = self
            .back_target()
            .ok_or(NavError::EmptyStack { layer: self.root })?;
        self.pop(layer)
    }

    /// Route events from `events` to `layer`.
    pub fn register(&mut self, layer: LayerId, events: BusSubscription) -> Result<(), NavError> {
        self.get(layer)?;
        let renderer = events.source();
        self.routes.insert(renderer, Route { layer, events });
        tracing::debug!(target: "nav", renderer = %renderer, layer = %layer, "renderer registered");
        Ok(())
    }

    /// Stop routing events from `renderer`.
    pub fn unregister(&mut self, renderer: RendererId) -> bool {
        self.routes.shift_remove(&renderer).is_some()
    }

    /// Layer that receives events from `renderer`.
    pub fn route_of(&self, renderer: RendererId) -> Option<LayerId> {
        self.routes.get(&renderer).map(|route| route.layer)
    }

    /// Route one event.
    ///
    /// Activations push the page built by `make_page` onto the renderer's
    /// target layer.
    pub fn dispatch<F>(&mut self, event: GridEvent, make_page: &mut F) -> Result<Dispatch, NavError>
    where
        F: FnMut(&ActivationEvent, LayerId) -> NavigationPage<V>,
    {
        let renderer = event.source();
        let layer = self
            .route_of(renderer)
            .ok_or(NavError::UnregisteredRenderer { renderer })?;

        match event {
            GridEvent::Activated(activation) => {
                let page = make_page(&activation, layer);
                let page_id = page.id();
                let depth = self.push(layer, page)?;
                Ok(Dispatch::Pushed {
                    layer,
                    page: page_id,
                    depth,
                })
            }
            GridEvent::ExpandRequested(request) => Ok(Dispatch::Expand {
                layer,
                source: request.source,
            }),
        }
    }

    /// Drain every registered subscription and route what was queued.
    pub fn pump<F>(&mut self, mut make_page: F) -> Vec<Dispatch>
    where
        F: FnMut(&ActivationEvent, LayerId) -> NavigationPage<V>,
    {
        let events: Vec<GridEvent> = self
            .routes
            .values_mut()
            .flat_map(|route| route.events.drain())
            .collect();

        let mut dispatched = Vec::with_capacity(events.len());
        for event in events {
            let result = self.dispatch(event, &mut make_page);
            if let Some(outcome) = self.apply_policy(result) {
                dispatched.push(outcome);
            }
        }
        dispatched
    }

    /// Surface a navigation error according to the policy.
    ///
    /// `Strict` panics; `Lenient` logs a warning and yields `None`.
    pub fn apply_policy<T>(&self, result: Result<T, NavError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => match self.policy {
                NavErrorPolicy::Strict => panic!("navigation error: {err}"),
                NavErrorPolicy::Lenient => {
                    tracing::warn!(target: "nav", error = %err, "navigation error ignored");
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> NavigationCoordinator<&'static str> {
        NavigationCoordinator::new("home", "Home").with_policy(NavErrorPolicy::Lenient)
    }

    #[test]
    fn test_unknown_layer() {
        let mut nav = coordinator();
        let missing = LayerId::new(42);
        let page = NavigationPage::new("x", "X", missing);
        assert_eq!(nav.push(missing, page), Err(NavError::UnknownLayer { layer: missing }));
        assert!(nav.pop(missing).is_err());
        assert!(!nav.can_go_back(missing));
    }

    #[test]
    fn test_pop_root_is_empty_stack() {
        let mut nav = coordinator();
        let root = nav.root();
        assert_eq!(nav.pop(root).unwrap_err(), NavError::EmptyStack { layer: root });
    }

    #[test]
    fn test_root_layer_cannot_be_destroyed() {
        let mut nav = coordinator();
        assert_eq!(nav.destroy_layer(nav.root()), Err(NavError::RootLayer));
    }

    #[test]
    fn test_replace_with_nothing_rejected() {
        let mut nav = coordinator();
        let root = nav.root();
        assert_eq!(nav.replace(root, Vec::new()), Err(NavError::EmptyStack { layer: root }));
        assert_eq!(nav.top_page(root).unwrap().content, "home");
    }

    #[test]
    fn test_destroy_cascades_to_nested_layers() {
        let mut nav = coordinator();
        let root = nav.root();
        let home = nav.top_page(root).unwrap().id();

        let tab = nav.create_layer(root, home, "tab", "Tab").unwrap();
        let tab_root = nav.top_page(tab).unwrap().id();
        let inner = nav.create_layer(tab, tab_root, "inner", "Inner").unwrap();
        nav.push(inner, NavigationPage::new("detail", "Detail", inner)).unwrap();

        assert_eq!(nav.destroy_layer(tab).unwrap(), 3);
        assert!(nav.layer(tab).is_none());
        assert!(nav.layer(inner).is_none());
        assert_eq!(nav.layers().count(), 1);
    }

    #[test]
    fn test_popping_host_page_unmounts_child_layers() {
        let mut nav = coordinator();
        let root = nav.root();
        let page = NavigationPage::new("section", "Section", root);
        let section = page.id();
        nav.push(root, page).unwrap();
        let child = nav.create_layer(root, section, "child", "Child").unwrap();

        nav.pop(root).unwrap();
        assert!(nav.layer(child).is_none());
    }

    #[test]
    fn test_outermost_layer() {
        let mut nav = coordinator();
        let root = nav.root();
        let home = nav.top_page(root).unwrap().id();
        let tab = nav.create_layer(root, home, "tab", "Tab").unwrap();
        assert_eq!(nav.outermost_layer(tab).unwrap(), root);
        assert_eq!(nav.outermost_layer(root).unwrap(), root);
    }

    #[test]
    fn test_lenient_policy_swallows() {
        let nav = coordinator();
        let result: Result<(), NavError> = Err(NavError::RootLayer);
        assert!(nav.apply_policy(result).is_none());
        assert_eq!(nav.apply_policy(Ok::<_, NavError>(3)), Some(3));
    }

    #[test]
    #[should_panic(expected = "navigation error")]
    fn test_strict_policy_panics() {
        let nav = coordinator().with_policy(NavErrorPolicy::Strict);
        nav.apply_policy::<()>(Err(NavError::RootLayer));
    }
}

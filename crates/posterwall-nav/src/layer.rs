//! Navigation layers.

use posterwall_core::LayerId;

use crate::page::{NavigationPage, PageId};

/// Where a child layer is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerHost {
    pub layer: LayerId,
    pub page: PageId,
}

/// Stack state of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Only the root page.
    Root,
    /// Pages above the root.
    Pushed { depth: usize },
}

/// An independently addressable page stack.
///
/// The stack is never empty: its first page is the layer's root page.
#[derive(Debug)]
pub struct NavigationLayer<V> {
    id: LayerId,
    stack: Vec<NavigationPage<V>>,
    parent: Option<LayerHost>,
    hidden: bool,
}

impl<V> NavigationLayer<V> {
    pub(crate) fn new(id: LayerId, root: NavigationPage<V>, parent: Option<LayerHost>) -> Self {
        Self {
            id,
            stack: vec![root],
            parent,
            hidden: false,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Host of this layer, `None` for the root layer.
    pub fn parent(&self) -> Option<LayerHost> {
        self.parent
    }

    pub fn pages(&self) -> &[NavigationPage<V>] {
        &self.stack
    }

    pub fn root_page(&self) -> &NavigationPage<V> {
        &self.stack[0]
    }

    pub fn top(&self) -> &NavigationPage<V> {
        &self.stack[self.stack.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut NavigationPage<V> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Pages above the root page.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn state(&self) -> LayerState {
        match self.depth() {
            0 => LayerState::Root,
            depth => LayerState::Pushed { depth },
        }
    }

    /// Back affordance is shown.
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn contains(&self, page: PageId) -> bool {
        self.stack.iter().any(|p| p.id() == page)
    }

    pub(crate) fn push(&mut self, page: NavigationPage<V>) -> usize {
        self.stack.push(page);
        self.depth()
    }

    /// Pop above the root. Returns `None` at the root page.
    pub(crate) fn pop(&mut self) -> Option<NavigationPage<V>> {
        if self.can_go_back() {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Swap the whole stack. `pages` must not be empty.
    pub(crate) fn replace(&mut self, pages: Vec<NavigationPage<V>>) -> Vec<NavigationPage<V>> {
        std::mem::replace(&mut self.stack, pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> NavigationLayer<&'static str> {
        let id = LayerId::new(1);
        NavigationLayer::new(id, NavigationPage::new("root", "Root", id), None)
    }

    #[test]
    fn test_state_machine() {
        let mut layer = layer();
        assert_eq!(layer.state(), LayerState::Root);
        assert!(!layer.can_go_back());

        layer.push(NavigationPage::new("a", "A", layer.id()));
        layer.push(NavigationPage::new("b", "B", layer.id()));
        assert_eq!(layer.state(), LayerState::Pushed { depth: 2 });
        assert_eq!(layer.top().content, "b");

        assert_eq!(layer.pop().map(|p| p.content), Some("b"));
        assert_eq!(layer.pop().map(|p| p.content), Some("a"));
        assert!(layer.pop().is_none());
        assert_eq!(layer.state(), LayerState::Root);
        assert_eq!(layer.root_page().content, "root");
    }
}

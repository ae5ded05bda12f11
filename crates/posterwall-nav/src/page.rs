//! Navigation pages.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use compact_str::CompactString;

use posterwall_core::LayerId;

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl PageId {
    fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// One entry of a navigation stack.
///
/// `content` is whatever the host needs to draw the page.
#[derive(Debug, Clone)]
pub struct NavigationPage<V> {
    id: PageId,
    pub content: V,
    pub title: CompactString,
    /// Layer the page was first pushed from.
    pub origin: LayerId,
}

impl<V> NavigationPage<V> {
    /// Create a page with a fresh id.
    pub fn new(content: V, title: impl Into<CompactString>, origin: LayerId) -> Self {
        Self {
            id: PageId::next(),
            content,
            title: title.into(),
            origin,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_get_distinct_ids() {
        let a = NavigationPage::new((), "A", LayerId::new(0));
        let b = NavigationPage::new((), "B", LayerId::new(0));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.title, "A");
    }
}

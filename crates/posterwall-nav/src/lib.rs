//! Layered navigation for posterwall.
//!
//! A [`NavigationCoordinator`] owns a tree of [`NavigationLayer`]s. Child
//! layers are mounted inside a page of their parent, e.g. one per tab.
//! Renderers are registered with a target layer when they are built, and
//! the coordinator turns their bus events into pushes on that layer.
//!
//! # Example
//!
//! ```rust
//! use posterwall_nav::{NavigationCoordinator, NavigationPage};
//!
//! let mut nav = NavigationCoordinator::new("home", "Home");
//! let root = nav.root();
//!
//! nav.push(root, NavigationPage::new("detail", "Dune", root)).unwrap();
//! assert!(nav.can_go_back(root));
//!
//! let page = nav.back().unwrap();
//! assert_eq!(page.title, "Dune");
//! assert!(!nav.can_go_back(root));
//! ```

mod coordinator;
mod layer;
mod page;

pub use coordinator::{Chrome, Dispatch, NavigationCoordinator};
pub use layer::{LayerHost, LayerState, NavigationLayer};
pub use page::{NavigationPage, PageId};

// Re-export core types for convenience
pub use posterwall_core::{LayerId, NavError, NavErrorPolicy};

use std::sync::Arc;
use std::time::{Duration, Instant};

use posterwall_core::{
    GridConfig, ItemId, ItemModel, LoadMode, MediaKind, NavError, NavErrorPolicy, SharedItem, SortKey,
    ThumbnailRef,
};
use posterwall_grid::{ShellWidget, VirtualizedCollectionRenderer};
use posterwall_nav::{Dispatch, LayerState, NavigationCoordinator, NavigationPage};

#[derive(Debug, Clone, PartialEq)]
enum View {
    Home,
    Tab,
    Section,
    Detail(SharedItem),
}

fn library(n: u64) -> Vec<SharedItem> {
    (0..n)
        .map(|i| {
            Arc::new(ItemModel::new(
                ItemId::new(i + 1),
                format!("Show {i}"),
                SortKey::new(format!("{i:04}")),
                ThumbnailRef::none(),
                MediaKind::Series,
            ))
        })
        .collect()
}

fn detail_page(event: &posterwall_core::ActivationEvent, layer: posterwall_core::LayerId) -> NavigationPage<View> {
    NavigationPage::new(View::Detail(event.model.clone()), event.model.title.clone(), layer)
}

fn grid(items: Vec<SharedItem>) -> VirtualizedCollectionRenderer<ShellWidget> {
    let mut grid = VirtualizedCollectionRenderer::new(GridConfig::default());
    grid.set_viewport(0.0, 3.0).unwrap();
    grid.ingest(items, LoadMode::Full).unwrap();
    grid
}

#[test]
fn test_activation_pushes_once_on_registered_layer() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();
    let home = nav.top_page(root).unwrap().id();

    // Tab layer inside the home page, section layer inside the tab
    let tab = nav.create_layer(root, home, View::Tab, "Series").unwrap();
    let tab_root = nav.top_page(tab).unwrap().id();
    let section = nav.create_layer(tab, tab_root, View::Section, "Recent").unwrap();

    // The grid lives in the section but targets the tab layer
    let mut renderer = grid(library(12));
    nav.register(tab, renderer.subscribe()).unwrap();

    assert!(renderer.activate(2, Instant::now()).unwrap());
    let dispatched = nav.pump(detail_page);

    assert_eq!(dispatched.len(), 1);
    assert!(matches!(dispatched[0], Dispatch::Pushed { layer, depth: 1, .. } if layer == tab));
    assert_eq!(nav.state(tab).unwrap(), LayerState::Pushed { depth: 1 });
    assert_eq!(nav.state(section).unwrap(), LayerState::Root);
    assert_eq!(nav.state(root).unwrap(), LayerState::Root);

    let chrome = nav.visible_chrome();
    let layers: Vec<_> = chrome.iter().map(|c| c.layer).collect();
    assert_eq!(layers, vec![root, tab]);
    assert_eq!(chrome[1].title, "Show 2");
    assert!(chrome[1].back_visible);
    assert!(!chrome[0].back_visible);
    assert!(!nav.is_visible(section));
}

#[test]
fn test_replace_after_edit_keeps_depth() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();

    let mut renderer = grid(library(5));
    nav.register(root, renderer.subscribe()).unwrap();
    renderer.activate(0, Instant::now()).unwrap();
    nav.pump(detail_page);
    assert_eq!(nav.state(root).unwrap(), LayerState::Pushed { depth: 1 });

    let View::Detail(item) = nav.top_page(root).unwrap().content.clone() else {
        panic!("expected a detail page on top");
    };
    let edited = Arc::new(item.with_watched(true));

    let home = nav.layer(root).unwrap().root_page().clone();
    let detail = NavigationPage::new(View::Detail(edited.clone()), edited.title.clone(), root);
    nav.replace(root, vec![home, detail]).unwrap();

    assert_eq!(nav.state(root).unwrap(), LayerState::Pushed { depth: 1 });
    match &nav.top_page(root).unwrap().content {
        View::Detail(shown) => assert!(shown.flags.watched),
        other => panic!("unexpected page: {other:?}"),
    }

    let popped = nav.pop(root).unwrap();
    assert!(matches!(popped.content, View::Detail(ref i) if i.flags.watched));
    assert_eq!(nav.top_page(root).unwrap().content, View::Home);
    assert_eq!(nav.pop(root).unwrap_err(), NavError::EmptyStack { layer: root });
}

#[test]
fn test_debounced_activations_push_once() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();
    let mut renderer = grid(library(10));
    nav.register(root, renderer.subscribe()).unwrap();

    let start = Instant::now();
    renderer.activate(1, start).unwrap();
    renderer.activate(1, start + Duration::from_millis(50)).unwrap();
    assert_eq!(nav.pump(detail_page).len(), 1);
    assert_eq!(nav.state(root).unwrap(), LayerState::Pushed { depth: 1 });

    renderer.activate(1, start + Duration::from_millis(1500)).unwrap();
    assert_eq!(nav.pump(detail_page).len(), 1);
    assert_eq!(nav.state(root).unwrap(), LayerState::Pushed { depth: 2 });
}

#[test]
fn test_expand_request_routed_to_host() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();

    let mut preview = VirtualizedCollectionRenderer::<ShellWidget>::new(GridConfig::default());
    preview.ingest(library(40), LoadMode::Limited(10)).unwrap();
    nav.register(root, preview.subscribe()).unwrap();

    assert!(preview.request_expand());
    let dispatched = nav.pump(detail_page);
    assert_eq!(
        dispatched,
        vec![Dispatch::Expand {
            layer: root,
            source: preview.id()
        }]
    );
    assert_eq!(nav.state(root).unwrap(), LayerState::Root);
}

#[test]
fn test_back_pops_innermost_visible_layer() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();
    let home = nav.top_page(root).unwrap().id();
    let movies = nav.create_layer(root, home, View::Tab, "Movies").unwrap();
    let series = nav.create_layer(root, home, View::Tab, "Series").unwrap();
    nav.set_hidden(movies, true).unwrap();

    nav.push(series, NavigationPage::new(View::Section, "All series", series))
        .unwrap();
    assert_eq!(nav.back_target(), Some(series));
    assert_eq!(nav.back().unwrap().title, "All series");

    assert_eq!(nav.back_target(), None);
    assert_eq!(nav.back().unwrap_err(), NavError::EmptyStack { layer: root });
}

#[test]
fn test_destroyed_layer_drops_routes() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let root = nav.root();
    let home = nav.top_page(root).unwrap().id();
    let tab = nav.create_layer(root, home, View::Tab, "Tab").unwrap();

    let mut renderer = grid(library(3));
    nav.register(tab, renderer.subscribe()).unwrap();
    assert_eq!(nav.route_of(renderer.id()), Some(tab));

    nav.destroy_layer(tab).unwrap();
    assert_eq!(nav.route_of(renderer.id()), None);

    renderer.activate(0, Instant::now()).unwrap();
    assert!(nav.pump(detail_page).is_empty());
}

#[test]
fn test_unregistered_renderer_is_rejected() {
    let mut nav = NavigationCoordinator::new(View::Home, "Home").with_policy(NavErrorPolicy::Lenient);
    let mut renderer = grid(library(3));
    let mut events = renderer.subscribe();
    renderer.activate(0, Instant::now()).unwrap();

    let event = events.try_next().unwrap();
    let err = nav.dispatch(event, &mut detail_page).unwrap_err();
    assert_eq!(err, NavError::UnregisteredRenderer { renderer: renderer.id() });
}

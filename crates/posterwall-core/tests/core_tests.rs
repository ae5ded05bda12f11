use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use posterwall_core::{
    CollectionSummary, GridConfig, ItemFlags, ItemId, ItemModel, LoadMode, MediaKind, SharedItem,
    SortKey, ThumbnailRef, dedup_by_id, sort_stable,
};

fn series(id: u64, title: &str, key: &str) -> SharedItem {
    Arc::new(ItemModel::new(
        ItemId::new(id),
        title,
        SortKey::new(key),
        ThumbnailRef::new(format!("/posters/{id}.jpg")),
        MediaKind::Series,
    ))
}

#[test]
fn test_item_model_json_shape() {
    let item = ItemModel::new(
        ItemId::new(603),
        "The Matrix",
        SortKey::new("1999-03-31"),
        ThumbnailRef::new("/posters/603.jpg"),
        MediaKind::Movie,
    )
    .with_release_date(NaiveDate::from_ymd_opt(1999, 3, 31).unwrap())
    .with_status("Released");

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], 603);
    assert_eq!(json["kind"], "movie");
    assert_eq!(json["sort_key"], "1999-03-31");
    assert_eq!(json["release_date"], "1999-03-31");

    let back: ItemModel = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
}

#[test]
fn test_item_model_minimal_json() {
    let json = r#"{"id": 1, "title": "Dark", "sort_key": "2017", "kind": "series"}"#;
    let item: ItemModel = serde_json::from_str(json).unwrap();

    assert_eq!(item.kind, MediaKind::Series);
    assert_eq!(item.flags, ItemFlags::default());
    assert!(item.thumbnail.as_str().is_empty());
    assert!(item.status.is_none());
}

#[test]
fn test_ordering_and_uniqueness_helpers() {
    let mut items = vec![
        series(3, "C", "2020"),
        series(1, "A", "2018"),
        series(2, "B", "2020"),
        series(1, "A again", "2019"),
    ];
    sort_stable(&mut items);
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "A again", "C", "B"]);

    let (kept, dropped) = dedup_by_id(items);
    assert_eq!(kept.len(), 3);
    assert_eq!(dropped, vec![ItemId::new(1)]);
}

#[test]
fn test_load_mode_serde() {
    let json = serde_json::to_string(&LoadMode::Limited(10)).unwrap();
    assert_eq!(json, r#"{"mode":"limited","limit":10}"#);
    let full: LoadMode = serde_json::from_str(r#"{"mode":"full"}"#).unwrap();
    assert_eq!(full, LoadMode::Full);
}

#[test]
fn test_collection_summary() {
    let summary = CollectionSummary::new(10, 1400);
    assert_eq!(summary.shown, 10);
    assert_eq!(summary.total_count, 1400);
    assert!(summary.has_more);
}

#[test]
fn test_grid_config_serde_uses_milliseconds() {
    let config = GridConfig::builder()
        .debounce_window(Duration::from_millis(1500))
        .build()
        .unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["debounce_window"], 1500);
    assert_eq!(json["tick_interval"], 8);

    let partial: GridConfig = serde_json::from_str(r#"{"chunk_size": 40}"#).unwrap();
    assert_eq!(partial.chunk_size, 40);
    assert_eq!(partial.pool_capacity, 25);
    assert_eq!(partial.debounce_window, Duration::from_secs(1));
}

//! Snapshot cache tests in offline mode (no network).

mod common;

use property_dashboard_sdk::{DashboardError, Session, SnapshotCache};
use std::time::Duration;

fn offline_cache(dir: &std::path::Path) -> SnapshotCache {
    SnapshotCache::new(
        Some(dir.to_path_buf()),
        "http://127.0.0.1:9/api/",
        true,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[test]
fn new_creates_cache_dir_and_trims_base_url() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("a").join("b");
    let cache = offline_cache(&nested);
    assert!(nested.is_dir());
    assert_eq!(cache.base_url, "http://127.0.0.1:9/api");
    assert_eq!(cache.snapshot_path(), nested.join("properties.json"));
}

#[test]
fn missing_snapshot_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = offline_cache(tmp.path());
    assert!(!cache.has_snapshot());

    let err = cache.load_properties(&Session::new()).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

#[test]
fn offline_fetch_never_touches_the_network() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = offline_cache(tmp.path());
    let err = cache.fetch_properties(&Session::new()).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

#[test]
fn stored_snapshot_round_trips_listings() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = offline_cache(tmp.path());
    let records = common::sample_records();

    cache.store_snapshot(&records).unwrap();
    assert!(cache.has_snapshot());
    assert!(!tmp.path().join("properties.json.tmp").exists());

    let loaded = cache.load_properties(&Session::new()).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn offline_fetch_property_looks_up_snapshot() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let store = sdk.store();
    let session = Session::new();

    let found = store.cache.borrow_mut().fetch_property("prop-005", &session).unwrap();
    assert_eq!(found.title, "Harbour House");

    let err = store.cache.borrow_mut().fetch_property("nope", &session).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

#[test]
fn corrupt_snapshot_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = offline_cache(tmp.path());
    std::fs::write(cache.snapshot_path(), b"[{\"propertyType\": \"house\"").unwrap();

    let err = cache.read_snapshot().unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(ref m) if m.contains("corrupt")));
    assert!(!cache.has_snapshot());
}

#[test]
fn non_array_snapshot_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = offline_cache(tmp.path());
    std::fs::write(cache.snapshot_path(), b"{\"data\": []}").unwrap();

    assert!(cache.read_snapshot().is_err());
    assert!(!cache.has_snapshot());
}

#[test]
fn non_object_entries_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = offline_cache(tmp.path());
    std::fs::write(
        cache.snapshot_path(),
        br#"[42, "junk", {"propertyType": "land", "price": "5"}]"#,
    )
    .unwrap();

    let records = cache.read_snapshot().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].property_type, "land");
}

#[test]
fn clear_empties_cache_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = offline_cache(tmp.path());
    cache.store_snapshot(&common::sample_records()).unwrap();

    cache.clear().unwrap();
    assert!(tmp.path().is_dir());
    assert!(!cache.has_snapshot());
}

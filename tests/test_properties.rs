//! Property query and SDK facade tests against the offline sample snapshot.

mod common;

use property_dashboard_sdk::queries::SearchPropertiesParams;
use property_dashboard_sdk::{DashboardError, Timeframe};

// ---------------------------------------------------------------------------
// list / count / get
// ---------------------------------------------------------------------------

#[test]
fn list_returns_all_listings_in_source_order() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let all = sdk.properties().list(None, None).unwrap();
    let ids: Vec<_> = all.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(
        ids,
        vec!["prop-001", "prop-002", "prop-003", "prop-004", "prop-005", "prop-006"]
    );
}

#[test]
fn list_paginates() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let page = sdk.properties().list(Some(2), Some(3)).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id.as_deref(), Some("prop-004"));
    assert_eq!(page[1].id.as_deref(), Some("prop-005"));

    assert!(sdk.properties().list(None, Some(10)).unwrap().is_empty());
}

#[test]
fn get_by_id() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let shop = sdk.properties().get("prop-004").unwrap().unwrap();
    assert_eq!(shop.title, "Corner Shop");
    assert!(sdk.properties().get("prop-999").unwrap().is_none());
}

#[test]
fn missing_snapshot_surfaces_not_found() {
    let (sdk, _tmp) = common::offline_sdk();
    let err = sdk.properties().count().unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn by_type_matches_raw_tag() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let houses = sdk.properties().by_type("house").unwrap();
    assert_eq!(houses.len(), 2);
    assert!(sdk.properties().by_type("House").unwrap().is_empty());
}

#[test]
fn by_status_is_case_insensitive() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let sold = sdk.properties().by_status("SOLD").unwrap();
    let ids: Vec<_> = sold.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec!["prop-001", "prop-004"]);
}

#[test]
fn search_combines_filters() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();

    let results = sdk
        .properties()
        .search(&SearchPropertiesParams {
            title: Some("house".into()),
            min_price: Some(100000.0),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Harbour House");

    let cheap = sdk
        .properties()
        .search(&SearchPropertiesParams {
            max_price: Some(100000.0),
            ..Default::default()
        })
        .unwrap();
    // "abc" coerces to 0 and so counts as cheap.
    let ids: Vec<_> = cheap.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec!["prop-003", "prop-004"]);
}

#[test]
fn search_rejects_inverted_price_range() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let err = sdk
        .properties()
        .search(&SearchPropertiesParams {
            min_price: Some(10.0),
            max_price: Some(1.0),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// SDK metrics and data management
// ---------------------------------------------------------------------------

#[test]
fn sdk_metrics_match_direct_aggregation() {
    let (sdk, _tmp) = common::offline_sdk_with_snapshot();
    let now = common::now();

    let via_sdk = sdk.metrics_at(Timeframe::Yearly, &now).unwrap();
    let direct = property_dashboard_sdk::aggregate_at(&common::sample_records(), Timeframe::Yearly, &now);
    assert_eq!(via_sdk, direct);

    let summary = sdk.summary_at(Timeframe::Yearly, &now).unwrap();
    assert_eq!(summary.total_properties, 4);
}

#[test]
fn load_records_bypasses_the_snapshot() {
    let (sdk, _tmp) = common::offline_sdk();
    sdk.load_records(vec![common::listing("farm", "10", (2026, 3, 17, 0))]);

    let metrics = sdk.metrics_at(Timeframe::Weekly, &common::now()).unwrap();
    assert_eq!(metrics.type_stats.len(), 1);
    assert_eq!(metrics.type_stats[0].type_field, "farm");
}

#[test]
fn save_snapshot_then_refresh_reloads_from_disk() {
    let (sdk, tmp) = common::offline_sdk();
    sdk.load_records(common::sample_records());
    sdk.save_snapshot().unwrap();
    assert!(tmp.path().join("properties.json").exists());

    assert_eq!(sdk.refresh().unwrap(), 6);
    assert_eq!(sdk.properties().count().unwrap(), 6);
}

#[test]
fn display_describes_the_sdk() {
    let (sdk, _tmp) = common::offline_sdk();
    let text = sdk.to_string();
    assert!(text.starts_with("DashboardSdk(base_url=http://127.0.0.1:9/api"));
    assert!(text.contains("loaded=false"));
    assert!(text.contains("offline=true"));
}

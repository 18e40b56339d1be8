//! Shared test fixtures for the property dashboard SDK integration tests.
//!
//! Provides a fixed "now", helpers to build listings from JSON, a small
//! sample portfolio, and `offline_sdk()` which creates an SDK backed by a
//! temporary cache directory that never touches the network.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use property_dashboard_sdk::{DashboardSdk, PropertyRecord};
use serde_json::{json, Value};

/// Wednesday 2026-03-18 12:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 12, 0, 0).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// RFC 3339 string for a UTC hour.
pub fn iso(y: i32, m: u32, d: u32, h: u32) -> String {
    utc(y, m, d, h).to_rfc3339()
}

/// Decode a listing with the given type, raw price and raw `createdAt`.
pub fn record(property_type: &str, price: Value, created_at: Value) -> PropertyRecord {
    serde_json::from_value(json!({
        "propertyType": property_type,
        "price": price,
        "status": "available",
        "createdAt": created_at,
    }))
    .unwrap()
}

/// Listing created at the given UTC hour with a string price.
pub fn listing(property_type: &str, price: &str, (y, m, d, h): (i32, u32, u32, u32)) -> PropertyRecord {
    record(property_type, json!(price), json!(iso(y, m, d, h)))
}

/// Six listings covering the shapes the property service emits.
pub fn sample_json() -> Value {
    json!([
        {
            "_id": "prop-001",
            "title": "Sunny Villa",
            "status": "sold",
            "propertyType": "house",
            "price": "250000",
            "isAvailable": false,
            "features": { "garage": true, "swimmingPool": false },
            "images": ["https://img.example/1.jpg"],
            "createdAt": "2026-03-16T10:00:00Z"
        },
        {
            "_id": "prop-002",
            "title": "City Flat",
            "status": "available",
            "propertyType": "apartment",
            "price": 120000,
            "isAvailable": true,
            "createdAt": "2026-03-02T08:00:00.000Z"
        },
        {
            "_id": "prop-003",
            "title": "Green Acres",
            "status": "pending",
            "propertyType": "land",
            "price": "abc",
            "createdAt": "2026-01-10T00:00:00Z"
        },
        {
            "_id": "prop-004",
            "title": "Corner Shop",
            "status": "Sold",
            "propertyType": "shop",
            "price": "80000",
            "createdAt": "2025-12-01T00:00:00Z"
        },
        {
            "_id": "prop-005",
            "title": "Harbour House",
            "status": "pending",
            "propertyType": "house",
            "price": "300000",
            "createdAt": { "$date": { "$numberLong": "1773738000000" } }
        },
        {
            "_id": "prop-006",
            "title": "Broken Date Duplex",
            "status": "available",
            "propertyType": "duplex",
            "price": "500000",
            "createdAt": { "$date": { "$numberLong": "oops" } }
        }
    ])
}

pub fn sample_records() -> Vec<PropertyRecord> {
    serde_json::from_value(sample_json()).unwrap()
}

/// Offline SDK over an empty temp cache directory.
///
/// Returns `(DashboardSdk, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn offline_sdk() -> (DashboardSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = DashboardSdk::builder()
        .base_url("http://127.0.0.1:9/api")
        .cache_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Offline SDK whose snapshot holds [`sample_json`].
pub fn offline_sdk_with_snapshot() -> (DashboardSdk, tempfile::TempDir) {
    let (sdk, tmp_dir) = offline_sdk();
    let path = tmp_dir.path().join("properties.json");
    std::fs::write(path, serde_json::to_vec(&sample_json()).unwrap()).unwrap();
    (sdk, tmp_dir)
}

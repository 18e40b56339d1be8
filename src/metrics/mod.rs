//! Dashboard metrics aggregation.
//!
//! Turns a list of [`PropertyRecord`]s and a [`Timeframe`] into per-type
//! statistics and a calendar-ordered trend series. Everything here is a pure
//! function of its arguments: no I/O, no shared state, fresh output on every
//! call.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use property_dashboard_sdk::metrics::{aggregate_at, Timeframe};
//! use property_dashboard_sdk::models::PropertyRecord;
//!
//! let records: Vec<PropertyRecord> = serde_json::from_str(r#"[
//!     {"propertyType": "house", "price": "100", "createdAt": "2026-01-05T10:00:00Z"},
//!     {"propertyType": "land",  "price": "50",  "createdAt": "2026-02-01T10:00:00Z"}
//! ]"#).unwrap();
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
//! let metrics = aggregate_at(&records, Timeframe::Yearly, &now);
//! assert_eq!(metrics.type_stats.len(), 2);
//! assert_eq!(metrics.trend[0].bucket_label, "Jan");
//! ```

mod labels;
mod timeframe;

pub use labels::property_type_label;
pub use timeframe::Timeframe;

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use indexmap::IndexMap;

use crate::models::stats::average;
use crate::models::{DashboardMetrics, DashboardSummary, PropertyRecord, PropertyTypeStat, TrendPoint};
use timeframe::TrendBucket;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    count: u64,
    revenue: f64,
}

impl Accumulator {
    fn add(&mut self, price: f64) {
        self.count += 1;
        self.revenue += price;
    }
}

// ---------------------------------------------------------------------------
// Windowing
// ---------------------------------------------------------------------------

/// Records inside the timeframe window, paired with their creation instant
/// in `now`'s time zone. Records whose timestamp cannot be normalized are
/// dropped here.
fn windowed<'a, Tz: TimeZone>(
    records: &'a [PropertyRecord],
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> Vec<(&'a PropertyRecord, DateTime<Tz>)> {
    let tz = now.timezone();
    let mut invalid = 0usize;

    let kept: Vec<_> = records
        .iter()
        .filter_map(|record| {
            let Some(created) = record.created_at_utc() else {
                invalid += 1;
                return None;
            };
            let at = created.with_timezone(&tz);
            if timeframe.contains(&at, now) {
                Some((record, at))
            } else {
                None
            }
        })
        .collect();

    if invalid > 0 {
        tracing::debug!(invalid, "excluded records with unreadable createdAt");
    }
    kept
}

/// The subset of `records` that falls inside `timeframe`'s window ending at
/// `now`, in input order.
pub fn window<'a, Tz: TimeZone>(
    records: &'a [PropertyRecord],
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> Vec<&'a PropertyRecord> {
    windowed(records, timeframe, now)
        .into_iter()
        .map(|(record, _)| record)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate `records` for `timeframe`, anchoring the window at the local
/// current time.
pub fn aggregate(records: &[PropertyRecord], timeframe: Timeframe) -> DashboardMetrics {
    aggregate_at(records, timeframe, &Local::now())
}

/// Aggregate `records` for `timeframe` with an explicit "now".
///
/// Weekday, day-of-month, month and year are all read in `now`'s time zone.
///
/// * `type_stats` — one entry per distinct raw `propertyType`, in order of
///   first appearance.
/// * `trend` — one entry per touched bucket (`Sun`..`Sat`, `Week N`, or
///   `Jan`..`Dec`), in calendar order. Empty buckets are omitted.
pub fn aggregate_at<Tz: TimeZone>(
    records: &[PropertyRecord],
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> DashboardMetrics {
    let rows = windowed(records, timeframe, now);

    let mut by_type: IndexMap<&str, Accumulator> = IndexMap::new();
    let mut by_bucket: BTreeMap<TrendBucket, Accumulator> = BTreeMap::new();

    for (record, at) in &rows {
        let price = record.price_amount();
        by_type
            .entry(record.property_type.as_str())
            .or_default()
            .add(price);
        by_bucket.entry(timeframe.bucket(at)).or_default().add(price);
    }

    tracing::debug!(
        %timeframe,
        input = records.len(),
        windowed = rows.len(),
        types = by_type.len(),
        buckets = by_bucket.len(),
        "aggregated dashboard metrics"
    );

    let type_stats = by_type
        .into_iter()
        .map(|(tag, acc)| PropertyTypeStat {
            type_field: tag.to_string(),
            count: acc.count,
            revenue: acc.revenue,
            average_price: average(acc.revenue, acc.count),
        })
        .collect();

    let trend = by_bucket
        .into_iter()
        .map(|(bucket, acc)| TrendPoint {
            bucket_label: bucket.label(),
            property_count: acc.count,
            revenue: acc.revenue,
        })
        .collect();

    DashboardMetrics { type_stats, trend }
}

// ---------------------------------------------------------------------------
// Summary totals
// ---------------------------------------------------------------------------

/// Headline totals for `timeframe`, anchored at the local current time.
pub fn summarize(records: &[PropertyRecord], timeframe: Timeframe) -> DashboardSummary {
    summarize_at(records, timeframe, &Local::now())
}

/// Headline totals over the same windowed records [`aggregate_at`] uses.
///
/// Sold and pending counts match `status` case-insensitively.
pub fn summarize_at<Tz: TimeZone>(
    records: &[PropertyRecord],
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let mut summary = DashboardSummary::default();

    for (record, _) in windowed(records, timeframe, now) {
        summary.total_properties += 1;
        summary.total_revenue += record.price_amount();

        let status = record.status.trim();
        if status.eq_ignore_ascii_case("sold") {
            summary.properties_sold += 1;
        } else if status.eq_ignore_ascii_case("pending") {
            summary.properties_pending += 1;
        }
    }

    summary.average_price = average(summary.total_revenue, summary.total_properties);
    summary
}

/// Copy of `stats` sorted by descending count. Ties keep their first-seen order.
pub fn sorted_by_count(stats: &[PropertyTypeStat]) -> Vec<PropertyTypeStat> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
}

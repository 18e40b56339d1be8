use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PropertyTypeStat — Count and revenue for one property type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeStat {
    #[serde(rename = "type")]
    pub type_field: String,
    pub count: u64,
    pub revenue: f64,
    /// `revenue / count`, or `0.0` for an empty group.
    pub average_price: f64,
}

// ---------------------------------------------------------------------------
// TrendPoint — One time bucket of the trend series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub bucket_label: String,
    pub property_count: u64,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// DashboardMetrics — Aggregator output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub type_stats: Vec<PropertyTypeStat>,
    pub trend: Vec<TrendPoint>,
}

impl DashboardMetrics {
    pub fn is_empty(&self) -> bool {
        self.type_stats.is_empty() && self.trend.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DashboardSummary — Headline totals for the stat cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_properties: u64,
    pub total_revenue: f64,
    pub average_price: f64,
    pub properties_sold: u64,
    pub properties_pending: u64,
}

/// `revenue / count`, never dividing by zero.
pub(crate) fn average(revenue: f64, count: u64) -> f64 {
    if count > 0 {
        revenue / count as f64
    } else {
        0.0
    }
}

//! Timeframe selection: the filtering window and the trend bucket granularity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Timeframe
// ---------------------------------------------------------------------------

/// The dashboard period filter.
///
/// A single value drives both which records are counted (the window anchored
/// at "now") and how the trend series is bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Timeframe {
    /// Last 7 days, bucketed by weekday.
    Weekly,
    /// Last calendar month, bucketed by week of month.
    Monthly,
    /// Current calendar year, bucketed by month.
    Yearly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Weekly, Timeframe::Monthly, Timeframe::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        }
    }

    /// Inclusive lower bound of the window, for the rolling timeframes.
    ///
    /// `Yearly` has no rolling bound (it matches on the calendar year) and
    /// returns `None`, as does a subtraction that leaves the representable
    /// range.
    pub fn window_start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            Timeframe::Weekly => now.clone().checked_sub_signed(Duration::days(7)),
            Timeframe::Monthly => month_before(now),
            Timeframe::Yearly => None,
        }
    }

    /// Whether an instant falls inside this timeframe's window ending at `now`.
    pub fn contains<Tz: TimeZone>(&self, at: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
        match self {
            Timeframe::Yearly => at.year() == now.year(),
            _ => match self.window_start(now) {
                Some(start) => *at >= start,
                None => true,
            },
        }
    }

    pub(crate) fn bucket<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> TrendBucket {
        match self {
            Timeframe::Weekly => TrendBucket::Weekday(at.weekday().num_days_from_sunday()),
            Timeframe::Monthly => TrendBucket::WeekOfMonth(at.day().div_ceil(7)),
            Timeframe::Yearly => TrendBucket::Month(at.month0()),
        }
    }
}

/// Same wall-clock time one calendar month before `now`, in `now`'s zone.
///
/// A wall-clock time inside a DST fold resolves to its earlier instant. One
/// inside a gap keeps the wall-clock distance and shifts the UTC instant by it.
fn month_before<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let local = now.naive_local();
    let target = local.checked_sub_months(Months::new(1))?;
    now.timezone()
        .from_local_datetime(&target)
        .earliest()
        .or_else(|| now.clone().checked_sub_signed(local - target))
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DashboardError::InvalidArgument(format!(
                    "Unknown timeframe '{s}' (expected weekly, monthly or yearly)"
                ))
            })
    }
}

impl TryFrom<String> for Timeframe {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// TrendBucket
// ---------------------------------------------------------------------------

/// Trend bucket key. The derived ordering is calendar order within a variant,
/// and a single aggregation only ever produces one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum TrendBucket {
    /// Days from Sunday, `0..=6`.
    Weekday(u32),
    /// `ceil(day_of_month / 7)`, `1..=5`.
    WeekOfMonth(u32),
    /// Zero-based month, `0..=11`.
    Month(u32),
}

impl TrendBucket {
    pub(crate) fn label(&self) -> String {
        match *self {
            TrendBucket::Weekday(d) => WEEKDAYS[d as usize % 7].to_string(),
            TrendBucket::WeekOfMonth(n) => format!("Week {n}"),
            TrendBucket::Month(m) => MONTHS[m as usize % 12].to_string(),
        }
    }
}

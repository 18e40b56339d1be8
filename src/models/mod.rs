pub mod account;
pub mod property;
pub mod stats;

pub use account::*;
pub use property::*;
pub use stats::{DashboardMetrics, DashboardSummary, PropertyTypeStat, TrendPoint};

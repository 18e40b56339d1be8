//! Property dashboard SDK for Rust.
//!
//! Loads property listings from a property back-office REST API, keeps a
//! local snapshot for offline use, and aggregates them into the metrics a
//! sales dashboard shows: per-type counts and revenue, a time-bucketed trend
//! series, and headline totals.
//!
//! # Quick start
//!
//! ```no_run
//! use property_dashboard_sdk::{DashboardSdk, Timeframe};
//!
//! let sdk = DashboardSdk::builder()
//!     .base_url("http://localhost:3000/api")
//!     .build()
//!     .unwrap();
//!
//! let metrics = sdk.metrics(Timeframe::Monthly).unwrap();
//! for point in &metrics.trend {
//!     println!("{}: {} listings", point.bucket_label, point.property_count);
//! }
//! ```
//!
//! # Logging
//!
//! The SDK emits [`tracing`] events and never installs a subscriber itself.
//! Hosts pick one, e.g. `tracing-subscriber` filtered by `RUST_LOG`:
//!
//! ```no_run
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::from_default_env())
//!     .init();
//!
//! let sdk = property_dashboard_sdk::DashboardSdk::builder().build().unwrap();
//! println!("{sdk}");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod session;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboardSdk;
pub use cache::SnapshotCache;
pub use error::{DashboardError, Result};
pub use metrics::{aggregate, aggregate_at, Timeframe};
pub use models::{DashboardMetrics, DashboardSummary, PropertyRecord, PropertyTypeStat, TrendPoint};
pub use session::Session;
pub use store::PropertyStore;

use std::cell::Ref;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use models::User;

// ---------------------------------------------------------------------------
// DashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DashboardSdk`] instance.
///
/// Use [`DashboardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardSdkBuilder::build) to create the SDK.
pub struct DashboardSdkBuilder {
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for DashboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl DashboardSdkBuilder {
    /// Set the property API base URL.
    ///
    /// If not set, `PROPERTY_DASHBOARD_API_URL` is read from the environment,
    /// falling back to [`config::DEFAULT_API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a custom cache directory for the property snapshot.
    ///
    /// If not set, the platform-appropriate default cache directory is used.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the API and only uses the
    /// previously saved snapshot. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK.
    ///
    /// Creates the cache directory but does **not** fetch anything: the
    /// property list is loaded lazily on first query.
    pub fn build(self) -> Result<DashboardSdk> {
        let base_url = self.base_url.unwrap_or_else(config::api_base_from_env);
        let cache = SnapshotCache::new(self.cache_dir, base_url, self.offline, self.timeout)?;
        Ok(DashboardSdk {
            store: PropertyStore::new(cache),
        })
    }
}

// ---------------------------------------------------------------------------
// DashboardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the property dashboard SDK.
///
/// Wraps a [`PropertyStore`] (which owns the [`SnapshotCache`] and the
/// [`Session`]) and exposes query and metrics interfaces over it.
///
/// Created via [`DashboardSdk::builder()`].
pub struct DashboardSdk {
    store: PropertyStore,
}

impl DashboardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DashboardSdkBuilder {
        DashboardSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the property query interface.
    pub fn properties(&self) -> queries::PropertyQuery<'_> {
        queries::PropertyQuery::new(&self.store)
    }

    // -- Metrics -----------------------------------------------------------

    /// Per-type statistics and trend series for `timeframe`, anchored at the
    /// local current time.
    pub fn metrics(&self, timeframe: Timeframe) -> Result<DashboardMetrics> {
        let records = self.store.records()?;
        Ok(metrics::aggregate(&records, timeframe))
    }

    /// [`metrics`](Self::metrics) with an explicit "now".
    pub fn metrics_at<Tz: TimeZone>(
        &self,
        timeframe: Timeframe,
        now: &DateTime<Tz>,
    ) -> Result<DashboardMetrics> {
        let records = self.store.records()?;
        Ok(metrics::aggregate_at(&records, timeframe, now))
    }

    /// Headline totals for `timeframe`, anchored at the local current time.
    pub fn summary(&self, timeframe: Timeframe) -> Result<DashboardSummary> {
        let records = self.store.records()?;
        Ok(metrics::summarize(&records, timeframe))
    }

    /// [`summary`](Self::summary) with an explicit "now".
    pub fn summary_at<Tz: TimeZone>(
        &self,
        timeframe: Timeframe,
        now: &DateTime<Tz>,
    ) -> Result<DashboardSummary> {
        let records = self.store.records()?;
        Ok(metrics::summarize_at(&records, timeframe, now))
    }

    // -- Session -----------------------------------------------------------

    /// Record a successful login. Subsequent requests carry the token.
    pub fn login(&self, user: User, token: impl Into<String>) {
        self.store.session.borrow_mut().login(user, token);
    }

    /// Start a session from a raw JWT, decoding the user from its payload.
    pub fn login_with_token(&self, token: &str) -> Result<User> {
        let session = Session::from_token(token)?;
        let user = session
            .user()
            .cloned()
            .ok_or_else(|| DashboardError::Unauthorized("Token carries no user".into()))?;
        self.login(user.clone(), token);
        Ok(user)
    }

    /// End the session and drop the in-memory property list, which may have
    /// been fetched with the user's credentials.
    pub fn logout(&self) {
        self.store.session.borrow_mut().logout();
        self.store.reset();
    }

    /// Borrow the current session.
    pub fn session(&self) -> Ref<'_, Session> {
        self.store.session.borrow()
    }

    // -- Data management ---------------------------------------------------

    /// Seed the SDK with records fetched elsewhere, bypassing the API.
    pub fn load_records(&self, records: Vec<PropertyRecord>) {
        self.store.insert_records(records);
    }

    /// Drop the in-memory list and load it again.
    ///
    /// Returns the number of records now loaded.
    pub fn refresh(&self) -> Result<usize> {
        self.store.reset();
        let count = self.store.records()?.len();
        tracing::info!(count, "property list refreshed");
        Ok(count)
    }

    /// Persist the currently loaded records as the offline snapshot.
    pub fn save_snapshot(&self) -> Result<()> {
        let records = self.store.records()?;
        self.store.cache.borrow().store_snapshot(&records)
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`PropertyStore`] for advanced usage.
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DashboardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.store.cache.borrow();
        write!(
            f,
            "DashboardSdk(base_url={}, cache_dir={}, loaded={}, offline={})",
            cache.base_url,
            cache.cache_dir.display(),
            self.store.is_loaded(),
            cache.offline
        )
    }
}

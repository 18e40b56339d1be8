//! Async wrapper around [`DashboardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! underlying HTTP client is blocking and aggregation is CPU-bound, so this
//! is the cheapest way to host the SDK inside an async service.
//!
//! # Example
//!
//! ```no_run
//! use property_dashboard_sdk::{AsyncDashboardSdk, Timeframe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncDashboardSdk::builder().build().await.unwrap();
//!
//!     let metrics = sdk.metrics(Timeframe::Weekly).await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let sold = sdk.run(|s| s.properties().by_status("sold")).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::metrics::Timeframe;
use crate::models::{DashboardMetrics, DashboardSummary};
use crate::DashboardSdk;

// ---------------------------------------------------------------------------
// AsyncDashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboardSdk`] instance.
pub struct AsyncDashboardSdkBuilder {
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncDashboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncDashboardSdkBuilder {
    /// Set the property API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncDashboardSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DashboardSdk::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncDashboardSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DashboardSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`DashboardSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncDashboardSdk {
    inner: Arc<Mutex<DashboardSdk>>,
}

impl AsyncDashboardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDashboardSdkBuilder {
        AsyncDashboardSdkBuilder::default()
    }

    /// Wrap an already-built [`DashboardSdk`].
    pub fn from_sdk(sdk: DashboardSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&DashboardSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DashboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Dashboard metrics for `timeframe`.
    pub async fn metrics(&self, timeframe: Timeframe) -> Result<DashboardMetrics> {
        self.run(move |s| s.metrics(timeframe)).await
    }

    /// Headline totals for `timeframe`.
    pub async fn summary(&self, timeframe: Timeframe) -> Result<DashboardSummary> {
        self.run(move |s| s.summary(timeframe)).await
    }

    /// Reload the property list.
    pub async fn refresh(&self) -> Result<usize> {
        self.run(|s| s.refresh()).await
    }
}

//! Property list fetcher with a local JSON snapshot.
//!
//! Fetches the listing array from the property service and keeps the last
//! successful response on disk, so dashboards can still be computed offline
//! or while the API is unreachable.

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::PropertyRecord;
use crate::session::Session;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fetches property listings over HTTP and snapshots them locally.
pub struct SnapshotCache {
    /// Directory where the snapshot is stored.
    pub cache_dir: PathBuf,
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// If true, never contact the API (use the snapshot only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
}

impl SnapshotCache {
    /// Create a new snapshot cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        base_url: impl Into<String>,
        offline: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            offline,
            timeout,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| DashboardError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Path of the property list snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.cache_dir.join(config::SNAPSHOT_FILE)
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().exists()
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    fn get_json(&mut self, path: &str, session: &Session) -> Result<Value> {
        if self.offline {
            return Err(DashboardError::NotFound(format!(
                "Cannot fetch '{}' while offline mode is enabled",
                path
            )));
        }
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "requesting");

        let client = self.client()?.clone();
        let mut request = client.get(&url);
        if let Some(bearer) = session.bearer() {
            request = request.header(AUTHORIZATION, bearer);
        }

        let resp = request.send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => {
                return Err(DashboardError::NotFound(format!("{} returned 404", url)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DashboardError::Unauthorized(format!(
                    "{} returned {}",
                    url,
                    resp.status()
                )))
            }
            _ => {}
        }
        Ok(resp.error_for_status()?.json()?)
    }

    /// Fetch the full property list and refresh the snapshot.
    pub fn fetch_properties(&mut self, session: &Session) -> Result<Vec<PropertyRecord>> {
        match self.get_json(config::PROPERTIES_PATH, session)? {
            Value::Array(items) => {
                self.write_snapshot(&items)?;
                Ok(decode_records(items))
            }
            _ => Err(DashboardError::InvalidArgument(
                "Property list response is not a JSON array".into(),
            )),
        }
    }

    /// Fetch a single listing by id.
    ///
    /// In offline mode the id is looked up in the snapshot instead.
    pub fn fetch_property(&mut self, id: &str, session: &Session) -> Result<PropertyRecord> {
        if self.offline {
            return self
                .read_snapshot()?
                .into_iter()
                .find(|r| r.id.as_deref() == Some(id))
                .ok_or_else(|| DashboardError::NotFound(format!("Property {} not in snapshot", id)));
        }
        let path = format!("{}/{}", config::PROPERTIES_PATH, id);
        let body = self.get_json(&path, session)?;
        Ok(serde_json::from_value(body)?)
    }

    /// Load the property list: from the API when online (falling back to the
    /// snapshot if the request fails at the transport level), otherwise from
    /// the snapshot.
    pub fn load_properties(&mut self, session: &Session) -> Result<Vec<PropertyRecord>> {
        if self.offline {
            return self.read_snapshot();
        }
        match self.fetch_properties(session) {
            Ok(records) => Ok(records),
            Err(DashboardError::Http(e)) if self.has_snapshot() => {
                tracing::warn!(error = %e, "property API unreachable; using cached snapshot");
                self.read_snapshot()
            }
            Err(e) => Err(e),
        }
    }

    /// Write the snapshot to a temp file first and rename on success, so an
    /// interrupted write never leaves a truncated snapshot behind.
    fn write_snapshot<T: Serialize + ?Sized>(&self, body: &T) -> Result<()> {
        let dest = self.snapshot_path();
        let tmp_dest = dest.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp_dest, serde_json::to_vec(body)?)?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_ok() {
            tracing::info!(path = %dest.display(), "property snapshot written");
        } else {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }
        result
    }

    /// Read and decode the snapshot.
    ///
    /// If the snapshot is corrupt it is deleted so the next online load
    /// replaces it.
    pub fn read_snapshot(&self) -> Result<Vec<PropertyRecord>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Err(DashboardError::NotFound(format!(
                "No property snapshot at {}{}",
                path.display(),
                if self.offline { " and offline mode is enabled" } else { "" }
            )));
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Array(items)) => Ok(decode_records(items)),
            Ok(_) => Err(evict(&path, "top-level value is not an array")),
            Err(e) => Err(evict(&path, &e.to_string())),
        }
    }

    /// Replace the snapshot with `records`.
    pub fn store_snapshot(&self, records: &[PropertyRecord]) -> Result<()> {
        self.write_snapshot(records)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

fn evict(path: &Path, reason: &str) -> DashboardError {
    tracing::warn!(path = %path.display(), reason, "corrupt property snapshot -- removing");
    let _ = fs::remove_file(path);
    DashboardError::NotFound(format!(
        "Snapshot '{}' was corrupt and has been removed. \
         Reload online to fetch a fresh copy. Original error: {}",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown"),
        reason
    ))
}

/// Decode listing objects one by one; entries that are not objects are skipped.
fn decode_records(items: Vec<Value>) -> Vec<PropertyRecord> {
    let total = items.len();
    let records: Vec<PropertyRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        tracing::warn!(skipped = total - records.len(), "skipped undecodable property entries");
    }
    records
}

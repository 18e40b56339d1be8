use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const API_BASE_ENV: &str = "PROPERTY_DASHBOARD_API_URL";

/// Collection path for property listings, relative to the API base.
pub const PROPERTIES_PATH: &str = "propertys";
/// File name of the on-disk property list snapshot inside the cache directory.
pub const SNAPSHOT_FILE: &str = "properties.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the API base URL: the `PROPERTY_DASHBOARD_API_URL` environment
/// variable if set and non-empty, otherwise [`DEFAULT_API_BASE`].
pub fn api_base_from_env() -> String {
    match std::env::var(API_BASE_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("property-dashboard-sdk")
    } else {
        PathBuf::from(".property-dashboard-sdk-cache")
    }
}

//! Time-bounded result cache stored as one JSON file.
//!
//! The file maps opaque keys to `{"timestamp": <unix seconds>, "data": ...}`.
//! Reads and writes are whole-file round trips without locking, so two
//! concurrent writers can lose one update; the last writer wins.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/// File name of the cache inside the cache directory.
const CACHE_FILE: &str = "cache_v1.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: f64,
    data: Value,
}

/// Key-value cache with lazy TTL expiry.
///
/// Never returns errors: a missing, unreadable or malformed file behaves as
/// an empty cache, and failed writes are dropped.
#[derive(Debug, Clone)]
pub struct ResultCache {
    /// `None` when caching is disabled.
    path: Option<PathBuf>,
    ttl: Duration,
}

impl ResultCache {
    /// Creates a cache backed by `path`. A zero TTL disables it.
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Self::disabled();
        }
        Self {
            path: Some(path.into()),
            ttl,
        }
    }

    /// Creates a cache that never stores or returns anything.
    pub fn disabled() -> Self {
        Self {
            path: None,
            ttl: Duration::ZERO,
        }
    }

    /// Returns the cache file location under a cache root directory.
    pub fn path_in(cache_root: &Path) -> PathBuf {
        cache_root.join("memo").join(CACHE_FILE)
    }

    /// Returns whether the cache reads and writes at all.
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the cache file path, if enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the entry for `key` if it is fresh and has the expected shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, now_seconds())
    }

    /// Like [`get`](Self::get), evaluating freshness at `now` (unix seconds).
    pub fn get_at<T: DeserializeOwned>(&self, key: &str, now: f64) -> Option<T> {
        let path = self.path.as_deref()?;
        if !path.exists() {
            return None;
        }

        let mut map = load(path);
        let entry: CacheEntry = serde_json::from_value(map.remove(key)?).ok()?;
        if now - entry.timestamp > self.ttl.as_secs_f64() {
            tracing::debug!(key, "cache entry expired");
            return None;
        }

        serde_json::from_value(entry.data).ok()
    }

    /// Stores `data` under `key`, stamped with the current time.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        self.set_at(key, data, now_seconds());
    }

    /// Like [`set`](Self::set), stamping the entry with `now` (unix seconds).
    pub fn set_at<T: Serialize>(&self, key: &str, data: &T, now: f64) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        if let Err(e) = store(path, key, data, now) {
            tracing::debug!(error = %e, path = %path.display(), "cache write failed");
        }
    }
}

fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Reads the whole mapping, treating any problem as an empty cache.
fn load(path: &Path) -> Map<String, Value> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str::<Value>(&s).ok())
        .and_then(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default()
}

fn store<T: Serialize>(path: &Path, key: &str, data: &T, now: f64) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut map = load(path);
    let entry = CacheEntry {
        timestamp: now,
        data: serde_json::to_value(data)?,
    };
    map.insert(key.to_string(), serde_json::to_value(entry)?);

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(serde_json::to_string(&map)?.as_bytes())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

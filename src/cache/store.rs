// Cache store for reading and writing cached data.
// Handles the versioned JSON envelope, TTL checks, and prefix-scoped eviction.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::storage::SharedStorage;

use super::clock::{Clock, SystemClock};

/// Envelope format version. Entries written with any other version are discarded.
pub const ENTRY_VERSION: u32 = 1;

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Envelope format version.
    pub v: u32,
    /// The cached data.
    pub data: T,
    /// When the data was cached. Never changed after the write.
    pub cached_at: DateTime<Utc>,
    /// Validity window in seconds. Missing or non-positive means always expired.
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
}

impl<T> CacheEntry<T> {
    /// Create a new entry stamped with `now`.
    pub fn new(data: T, cached_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            v: ENTRY_VERSION,
            data,
            cached_at,
            ttl_seconds: Some(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)),
        }
    }

    /// Check if this entry is still within its TTL at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.ttl_seconds {
            Some(ttl) if ttl > 0 => {
                let age = now.signed_duration_since(self.cached_at);
                age <= chrono::Duration::seconds(ttl)
            }
            _ => false,
        }
    }
}

/// Counts of entries under a prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub fresh: usize,
    pub expired: usize,
}

/// TTL-scoped cache over a shared storage medium.
///
/// Every operation is best-effort: failures are logged and degrade to
/// "absent" (reads) or "dropped" (writes). Nothing here returns an error.
#[derive(Clone)]
pub struct CacheStore {
    storage: SharedStorage,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: SharedStorage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Write `data` under `key`, valid for `ttl`. Overwrites any previous entry.
    pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) {
        let entry = CacheEntry::new(data, self.clock.now(), ttl);

        let result = serde_json::to_string(&entry)
            .map_err(|e| e.to_string())
            .and_then(|json| self.storage.set(key, &json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => debug!(key, ttl_secs = ttl.as_secs(), "cache write"),
            Err(reason) => {
                let err = CacheError::WriteFailed {
                    key: key.to_string(),
                    reason,
                };
                warn!(error = %err, "cache write failed");
            }
        }
    }

    /// Read `key` only if it is still fresh. Expired entries are left in place.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.read_entry::<T>(key)?;
        if entry.is_fresh(self.clock.now()) {
            debug!(key, "cache hit");
            Some(entry.data)
        } else {
            debug!(key, "cache entry expired");
            None
        }
    }

    /// Read `key` regardless of age.
    pub fn get_stale<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_entry::<T>(key).map(|entry| entry.data)
    }

    /// Delete a single entry. No-op if it does not exist.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove(key) {
            warn!(key, error = %err, "cache remove failed");
        }
    }

    /// Delete entries whose key starts with `prefix`.
    ///
    /// With `None` the entire storage medium is wiped, including anything
    /// that is not a cache entry (such as the stored credential). The
    /// [`Session`](crate::session::Session) is not told about this: its
    /// state stays `Authenticated` while its token reads as absent. Sign
    /// out through the session and pass [`super::CACHE_PREFIX`] here to
    /// clear only cached data.
    pub fn clear(&self, prefix: Option<&str>) {
        match prefix {
            None => {
                self.storage.clear();
                debug!("storage cleared");
            }
            Some(prefix) => {
                let keys: Vec<String> = self
                    .storage
                    .keys()
                    .into_iter()
                    .filter(|k| k.starts_with(prefix))
                    .collect();
                for key in &keys {
                    if let Err(err) = self.storage.remove(key) {
                        warn!(key, error = %err, "cache remove failed");
                    }
                }
                debug!(prefix, removed = keys.len(), "cache invalidated");
            }
        }
    }

    /// Count fresh and expired entries under `prefix`. Unreadable entries count as expired.
    pub fn stats(&self, prefix: &str) -> CacheStats {
        let now = self.clock.now();
        let mut stats = CacheStats::default();

        for key in self.storage.keys().iter().filter(|k| k.starts_with(prefix)) {
            stats.total += 1;
            let fresh = self
                .read_entry::<serde_json::Value>(key)
                .is_some_and(|entry| entry.is_fresh(now));
            if fresh {
                stats.fresh += 1;
            } else {
                stats.expired += 1;
            }
        }
        stats
    }

    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = self.storage.get(key)?;

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                let err = CacheError::ReadCorrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "ignoring cache entry");
                return None;
            }
        };

        if entry.v != ENTRY_VERSION {
            let err = CacheError::ReadCorrupt {
                key: key.to_string(),
                reason: format!("envelope version {} != {}", entry.v, ENTRY_VERSION),
            };
            debug!(error = %err, "ignoring cache entry");
            return None;
        }

        Some(entry)
    }
}

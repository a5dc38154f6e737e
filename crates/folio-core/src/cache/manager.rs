use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Clock, Storage};
use crate::models::PortfolioData;

/// Storage key for the portfolio payload.
pub const CACHE_KEY: &str = "portfolio_sanity_data";

/// Consider the cache stale after 24 hours.
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

const MINUTE_MS: i64 = 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    /// Epoch milliseconds at write time.
    #[serde(rename = "timestamp")]
    pub cached_at: i64,
}

impl<T> CachedData<T> {
    pub fn new(data: T, now_millis: i64) -> Self {
        Self {
            data,
            cached_at: now_millis,
        }
    }

    /// Saturates instead of overflowing on timestamps read back from storage.
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.cached_at)
    }

    /// Fresh while strictly younger than `ttl_ms`.
    pub fn is_fresh(&self, now_millis: i64, ttl_ms: i64) -> bool {
        self.age_millis(now_millis) < ttl_ms
    }

    pub fn age_display(&self, now_millis: i64) -> String {
        let minutes = self.age_millis(now_millis) / MINUTE_MS;
        if minutes < 1 {
            // Also covers clock skew (negative age)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// Cache for the portfolio payload.
///
/// Built without storage (see [`ContentCache::without_storage`]) it behaves
/// as an always-empty cache, which is what a server-side render sees.
pub struct ContentCache {
    storage: Option<Box<dyn Storage>>,
    clock: Box<dyn Clock>,
    ttl_ms: i64,
}

impl ContentCache {
    pub fn new(storage: impl Storage + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            storage: Some(Box::new(storage)),
            clock: Box::new(clock),
            ttl_ms: CACHE_TTL_MS,
        }
    }

    pub fn without_storage(clock: impl Clock + 'static) -> Self {
        Self {
            storage: None,
            clock: Box::new(clock),
            ttl_ms: CACHE_TTL_MS,
        }
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Cached payload, if present and fresh.
    pub fn read(&self) -> Option<PortfolioData> {
        self.read_entry().map(|entry| entry.data)
    }

    /// Cached payload with its write time, if present and fresh.
    ///
    /// Expired and corrupt entries are removed on the way out.
    pub fn read_entry(&self) -> Option<CachedData<PortfolioData>> {
        self.load(CACHE_KEY)
    }

    /// Store `data` stamped with the current time. Failures are logged only.
    pub fn write(&self, data: &PortfolioData) {
        self.save(CACHE_KEY, data);
    }

    /// Drop the cached payload. Safe to call on an empty cache.
    pub fn invalidate(&self) {
        let Some(storage) = self.storage.as_deref() else {
            return;
        };
        if let Err(e) = storage.remove(CACHE_KEY) {
            warn!(cache = CACHE_KEY, error = %e, "Failed to remove cache entry");
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let storage = self.storage.as_deref()?;

        let raw = match storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(cache = key, "Cache miss");
                return None;
            }
            Err(e) => {
                debug!(cache = key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        let cached: CachedData<T> = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(e) => {
                debug!(cache = key, error = %e, "Dropping unreadable cache entry");
                self.discard(storage, key);
                return None;
            }
        };

        let now = self.clock.now_millis();
        if cached.is_fresh(now, self.ttl_ms) {
            debug!(cache = key, age = %cached.age_display(now), "Cache hit");
            Some(cached)
        } else {
            debug!(cache = key, "Cache entry expired");
            self.discard(storage, key);
            None
        }
    }

    fn save<T: Serialize>(&self, key: &str, data: &T) {
        let Some(storage) = self.storage.as_deref() else {
            return;
        };

        let cached = CachedData::new(data, self.clock.now_millis());
        let contents = match serde_json::to_string(&cached) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(cache = key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = storage.set(key, &contents) {
            warn!(cache = key, error = %e, "Failed to write cache entry");
        }
    }

    fn discard(&self, storage: &dyn Storage, key: &str) {
        if let Err(e) = storage.remove(key) {
            warn!(cache = key, error = %e, "Failed to remove cache entry");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

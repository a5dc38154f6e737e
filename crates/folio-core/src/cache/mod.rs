//! Local caching module for offline content access.
//!
//! This module provides the `ContentCache` for storing and retrieving the
//! portfolio payload. The payload is stored as JSON under a single key and
//! considered stale after 24 hours.
//!
//! The cache never fails its caller: missing storage, unreadable or
//! corrupt entries, and failed writes all degrade to a cache miss.
//! Storage and time are injected (`Storage`, `Clock`) so the cache can run
//! against a directory on disk, an in-memory map, or nothing at all.

pub mod clock;
pub mod manager;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{CachedData, ContentCache, CACHE_KEY, CACHE_TTL_MS};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

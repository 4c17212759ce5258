use std::collections::HashMap;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;
use parking_lot::Mutex;

use super::error::CacheError;

/// Key/value backend required by the search result cache.
///
/// Models an external cache store: string keys, per-entry TTL expiry, and an
/// atomic increment-and-read primitive for counters. Implementations provide
/// their own synchronization; callers never hold locks across these calls.
pub trait CacheBackend: Send + Sync {
    /// Reads a value. `Ok(None)` is a miss.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>, CacheError>> + Send;

    /// Writes a value with a per-entry time-to-live.
    fn put(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;

    /// Atomically increments a counter and returns the new value.
    ///
    /// A missing counter starts at zero. Concurrent readers observe either the
    /// pre- or post-increment value, never a torn one.
    fn incr(&self, key: &str) -> impl std::future::Future<Output = Result<u64, CacheError>> + Send;

    /// Reads a counter without modifying it. A missing counter reads as zero.
    fn read_counter(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<u64, CacheError>> + Send;
}

#[derive(Clone)]
struct TtlEntry {
    value: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, TtlEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &TtlEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-process backend: moka for TTL entries, a mutex-guarded table for
/// counters.
pub struct MemoryBackend {
    entries: Cache<String, TtlEntry>,
    counters: Mutex<HashMap<String, u64>>,
}

impl MemoryBackend {
    pub const DEFAULT_CAPACITY: u64 = 10_000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .expire_after(PerEntryTtl)
                .build(),
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live entries (maintenance may lag; see moka docs).
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).map(|entry| entry.value))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), TtlEntry { value, ttl });
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<u64, CacheError> {
        let mut counters = self.counters.lock();
        let counter = counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn read_counter(&self, key: &str) -> Result<u64, CacheError> {
        Ok(self.counters.lock().get(key).copied().unwrap_or(0))
    }
}

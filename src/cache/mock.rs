use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use super::backend::{CacheBackend, MemoryBackend};
use super::error::CacheError;

/// Fault-injecting backend for exercising fail-open paths.
///
/// Delegates to a [`MemoryBackend`] and counts every call; each operation can
/// be toggled to fail.
#[derive(Debug, Default)]
pub struct MockCacheBackend {
    inner: MemoryBackend,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
    fail_counters: AtomicBool,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
    incr_calls: AtomicUsize,
}

impl MockCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_counters(&self, fail: bool) {
        self.fail_counters.store(fail, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn incr_calls(&self) -> usize {
        self.incr_calls.load(Ordering::SeqCst)
    }

    fn unreachable_error() -> CacheError {
        CacheError::Backend {
            message: "cache store unreachable".to_string(),
        }
    }
}

impl CacheBackend for MockCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        self.inner.put(key, value, ttl).await
    }

    async fn incr(&self, key: &str) -> Result<u64, CacheError> {
        self.incr_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_counters.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        self.inner.incr(key).await
    }

    async fn read_counter(&self, key: &str) -> Result<u64, CacheError> {
        if self.fail_counters.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        self.inner.read_counter(key).await
    }
}

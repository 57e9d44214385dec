//! Shared fixtures for the integration suites: a spy logger and
//! instrumented cache stores.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use registry_acl::{CacheError, CacheStore, Logger, MemoryCache};

/// Records every log line with its severity.
#[derive(Default)]
pub struct SpyLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl SpyLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: &'static str, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    pub fn messages(&self, level: &'static str) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages("info")
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages("error")
    }
}

impl Logger for SpyLogger {
    fn debug(&self, message: &str) {
        self.record("debug", message);
    }

    fn info(&self, message: &str) {
        self.record("info", message);
    }

    fn warn(&self, message: &str) {
        self.record("warn", message);
    }

    fn error(&self, message: &str) {
        self.record("error", message);
    }
}

/// A working in-memory cache that counts calls and remembers the last
/// ttl passed to `setex`.
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryCache,
    gets: AtomicUsize,
    sets: AtomicUsize,
    dels: AtomicUsize,
    last_ttl: Mutex<Option<u64>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn setex_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn del_calls(&self) -> usize {
        self.dels.load(Ordering::SeqCst)
    }

    pub fn last_ttl(&self) -> Option<u64> {
        *self.last_ttl.lock().unwrap()
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn setex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        *self.last_ttl.lock().unwrap() = Some(ttl_secs);
        self.inner.setex(key, ttl_secs, value).await
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.dels.fetch_add(1, Ordering::SeqCst);
        self.inner.del(key).await
    }
}

/// A cache store whose every operation fails.
#[derive(Default)]
pub struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Store("connection refused".to_string()))
    }

    async fn setex(&self, _key: &str, _ttl_secs: u64, _value: &str) -> Result<(), CacheError> {
        Err(CacheError::Store("connection refused".to_string()))
    }

    async fn del(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Store("connection refused".to_string()))
    }
}

/// A cache store that only fails writes.
#[derive(Default)]
pub struct ReadOnlyCache {
    inner: MemoryCache,
}

#[async_trait]
impl CacheStore for ReadOnlyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn setex(&self, _key: &str, _ttl_secs: u64, _value: &str) -> Result<(), CacheError> {
        Err(CacheError::Store("READONLY".to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.inner.del(key).await
    }
}

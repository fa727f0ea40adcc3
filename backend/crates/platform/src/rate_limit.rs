//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by `"{prefix}:{key}:{window_index}"`, where
//! `window_index = now_ms / window_ms`. Two stores share the semantics:
//! - [`RedisRateLimitStore`] for deployments (counters shared by all nodes)
//! - [`MemoryRateLimitStore`] for tests and single-node development

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use redis::aio::ConnectionManager;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 120,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Window index and its end (ms) for `now_ms`
    pub fn window_at(&self, now_ms: i64) -> (i64, i64) {
        let window_ms = self.window_ms().max(1);
        let index = now_ms / window_ms;
        (index, (index + 1) * window_ms)
    }

    /// Build the result for the `count`-th request of a window
    pub fn evaluate(&self, count: u32, reset_at_ms: i64) -> RateLimitResult {
        RateLimitResult {
            allowed: count <= self.max_requests,
            remaining: self.max_requests.saturating_sub(count),
            reset_at_ms,
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, at least 1
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let ms = (self.reset_at_ms - now_ms).max(0) as u64;
        ms.div_ceil(1000).max(1)
    }
}

pub type RateLimitError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count this request against `key` and report whether it is allowed
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError>;
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

// ============================================================================
// Redis
// ============================================================================

/// Redis-backed fixed window
///
/// `INCR` and `EXPIRE` run in one `MULTI` pipeline so a counter never
/// outlives its window.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisRateLimitStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    pub async fn connect(url: &str, prefix: impl Into<String>) -> redis::RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn, prefix))
    }

    fn window_key(&self, key: &str, index: i64) -> String {
        format!("{}:{}:{}", self.prefix, key, index)
    }
}

impl RateLimitStore for RedisRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        let (index, reset_at_ms) = config.window_at(now_ms());
        let redis_key = self.window_key(key, index);
        let ttl_secs = config.window.as_secs().max(1) as i64;

        let mut conn = self.conn.clone();
        let (count,): (u32,) = redis::pipe()
            .atomic()
            .incr(&redis_key, 1)
            .expire(&redis_key, ttl_secs)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(config.evaluate(count, reset_at_ms))
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Expired counters are swept at most this often
const SWEEP_INTERVAL_MS: i64 = 60_000;

/// Process-local fixed window on a [`DashMap`]. Counters from ended windows
/// are swept on the first hit after each interval.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    /// key -> (window end ms, count); the end is comparable across scopes
    windows: DashMap<String, (i64, u32)>,
    next_sweep_ms: AtomicI64,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as the trait method with an explicit clock
    pub fn hit_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        // Before taking an entry guard: `retain` locks every shard
        self.sweep_if_due(now_ms);

        let (_, reset_at_ms) = config.window_at(now_ms);
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert((reset_at_ms, 0));
        if entry.0 != reset_at_ms {
            *entry = (reset_at_ms, 0);
        }
        entry.1 = entry.1.saturating_add(1);
        let count = entry.1;
        drop(entry);

        config.evaluate(count, reset_at_ms)
    }

    /// Drop counters whose window has ended
    pub fn purge_stale(&self, now_ms: i64) {
        self.windows.retain(|_, (reset_at_ms, _)| *reset_at_ms > now_ms);
    }

    fn sweep_if_due(&self, now_ms: i64) {
        let due = self.next_sweep_ms.load(Ordering::Relaxed);
        if now_ms < due {
            return;
        }
        // One caller wins the sweep for this interval
        if self
            .next_sweep_ms
            .compare_exchange(
                due,
                now_ms + SWEEP_INTERVAL_MS,
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            self.purge_stale(now_ms);
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.hit_at(key, config, now_ms()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_request_after_max() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);
        let t = 1_000_000;

        for expected_remaining in [2, 1, 0] {
            let r = store.hit_at("ip:10.0.0.1", &config, t);
            assert!(r.allowed);
            assert_eq!(r.remaining, expected_remaining);
        }
        let blocked = store.hit_at("ip:10.0.0.1", &config, t + 10);
        assert!(!blocked.allowed);
        assert_eq!(blocked.remaining, 0);
    }

    #[test]
    fn test_resets_next_window() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);
        let t = 120_000; // start of window 2

        assert!(store.hit_at("user:a", &config, t).allowed);
        assert!(!store.hit_at("user:a", &config, t + 59_999).allowed);
        assert!(store.hit_at("user:a", &config, t + 60_000).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.hit_at("ip:1.1.1.1", &config, 0).allowed);
        assert!(store.hit_at("ip:2.2.2.2", &config, 0).allowed);
    }

    #[test]
    fn test_window_bounds_and_retry_after() {
        let config = RateLimitConfig::new(5, 60);
        assert_eq!(config.window_at(59_999), (0, 60_000));
        assert_eq!(config.window_at(60_000), (1, 120_000));

        let result = config.evaluate(6, 60_000);
        assert_eq!(result.retry_after_secs(58_500), 2);
        assert_eq!(result.retry_after_secs(60_000), 1);
    }

    #[test]
    fn test_purge_stale_across_window_lengths() {
        let store = MemoryRateLimitStore::new();
        let minute = RateLimitConfig::new(5, 60);
        let hour = RateLimitConfig::new(5, 3600);
        store.hit_at("ip:old", &minute, 0);
        store.hit_at("auth:ip", &hour, 0);
        store.hit_at("ip:new", &minute, 60_000);

        store.purge_stale(60_000);
        let mut kept: Vec<_> = store.windows.iter().map(|e| e.key().clone()).collect();
        kept.sort();
        assert_eq!(kept, ["auth:ip", "ip:new"]);
    }

    #[test]
    fn test_hits_sweep_expired_counters() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(5, 60);
        for i in 0..100 {
            store.hit_at(&format!("ip:10.0.0.{i}"), &config, 1_000);
        }
        assert_eq!(store.windows.len(), 100);

        // Still inside the sweep interval: nothing dropped
        store.hit_at("ip:late", &config, 30_000);
        assert_eq!(store.windows.len(), 101);

        store.hit_at("ip:next", &config, 61_000);
        assert_eq!(store.windows.len(), 1);
        assert!(store.hit_at("ip:10.0.0.1", &config, 61_500).allowed);
    }

    #[tokio::test]
    async fn test_trait_impl_counts() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(2, 3600);
        let first = RateLimitStore::check_and_increment(&store, "k", &config)
            .await
            .unwrap();
        let second = RateLimitStore::check_and_increment(&store, "k", &config)
            .await
            .unwrap();
        assert!(first.allowed && second.allowed);
        assert_eq!(second.remaining, 0);
    }
}

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use redis::aio::ConnectionManager;
use tokio::time::Instant;

use crate::cache::models::RateLimitEntry;
use crate::cache::operations::RateLimitCacheOperations;

/// 条目数超过该值时清理已过期的窗口
const PRUNE_THRESHOLD: usize = 1024;

/// 两次清理之间的最小间隔
const PRUNE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Default)]
struct Windows {
    entries: HashMap<String, RateLimitEntry>,
    next_prune_at: Option<Instant>,
}

impl Windows {
    /// 调用方标识来自请求头，过期条目与不存在等价，清理掉避免无限增长
    fn prune_expired(&mut self, now: Instant) {
        if self.entries.len() < PRUNE_THRESHOLD
            || self.next_prune_at.is_some_and(|at| now < at)
        {
            return;
        }
        self.entries.retain(|_, entry| now < entry.reset_at);
        self.next_prune_at = Some(now + PRUNE_INTERVAL);
    }
}

/// 进程内固定窗口限流器
///
/// 窗口边界附近最多可放行 `2 * max_requests` 个请求，这是固定窗口本身的特性。
#[derive(Default)]
pub struct MemoryRateLimiter {
    windows: Mutex<Windows>,
}

impl MemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock();
        windows.prune_expired(now);
        match windows.entries.get_mut(key) {
            Some(entry) => entry.hit(now, max_requests, window),
            None => {
                windows
                    .entries
                    .insert(key.to_string(), RateLimitEntry::new(now, window));
                true
            }
        }
    }

    #[cfg(test)]
    fn count(&self, key: &str) -> Option<u32> {
        self.windows.lock().entries.get(key).map(|entry| entry.count)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.windows.lock().entries.len()
    }
}

/// 限流后端：默认进程内计数，配置了 Redis 时多实例共享窗口
pub enum RateLimiter {
    Memory(MemoryRateLimiter),
    Redis(ConnectionManager),
}

impl RateLimiter {
    pub fn memory() -> Self {
        RateLimiter::Memory(MemoryRateLimiter::new())
    }

    /// 建立共享连接，之后的请求复用同一条连接
    pub async fn redis(client: redis::Client) -> Result<Self, redis::RedisError> {
        Ok(RateLimiter::Redis(ConnectionManager::new(client).await?))
    }

    pub async fn allow(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
    ) -> Result<bool, redis::RedisError> {
        match self {
            RateLimiter::Memory(limiter) => Ok(limiter.allow(key, max_requests, window)),
            RateLimiter::Redis(conn) => {
                RateLimitCacheOperations::hit(conn, key, max_requests, window).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn first_n_allowed_then_denied() {
        let limiter = MemoryRateLimiter::new();
        for _ in 0..5 {
            assert!(limiter.allow("contact:1.2.3.4", 5, WINDOW));
        }
        assert!(!limiter.allow("contact:1.2.3.4", 5, WINDOW));
        assert!(!limiter.allow("contact:1.2.3.4", 5, WINDOW));
        // 拒绝不计数
        assert_eq!(limiter.count("contact:1.2.3.4"), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_elapsing() {
        let limiter = MemoryRateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.allow("github:a", 3, WINDOW));
        }
        assert!(!limiter.allow("github:a", 3, WINDOW));

        tokio::time::advance(WINDOW).await;
        assert!(limiter.allow("github:a", 3, WINDOW));
        assert_eq!(limiter.count("github:a"), Some(1));
        assert!(limiter.allow("github:a", 3, WINDOW));
        assert!(limiter.allow("github:a", 3, WINDOW));
        assert!(!limiter.allow("github:a", 3, WINDOW));
    }

    #[tokio::test(start_paused = true)]
    async fn window_is_fixed_from_first_request() {
        let limiter = MemoryRateLimiter::new();
        assert!(limiter.allow("k", 2, WINDOW));
        tokio::time::advance(WINDOW - Duration::from_secs(1)).await;
        assert!(limiter.allow("k", 2, WINDOW));
        assert!(!limiter.allow("k", 2, WINDOW));
        // 边界之后立即放行新的一批
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.allow("k", 2, WINDOW));
        assert!(limiter.allow("k", 2, WINDOW));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_windows_are_pruned() {
        let limiter = MemoryRateLimiter::new();
        for i in 0..10_000 {
            assert!(limiter.allow(&format!("contact:spoofed-{}", i), 5, WINDOW));
        }
        assert_eq!(limiter.len(), 10_000);

        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        assert!(limiter.allow("contact:real", 5, WINDOW));
        assert_eq!(limiter.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pruning_keeps_live_windows() {
        let limiter = MemoryRateLimiter::new();
        assert!(limiter.allow("contact:live", 1, WINDOW * 2));
        for i in 0..PRUNE_THRESHOLD {
            limiter.allow(&format!("contact:old-{}", i), 1, WINDOW);
        }

        tokio::time::advance(WINDOW).await;
        assert!(limiter.allow("contact:new", 1, WINDOW));
        assert_eq!(limiter.len(), 2);
        // 仍在窗口内的计数没有被清掉
        assert!(!limiter.allow("contact:live", 1, WINDOW * 2));
    }

    #[tokio::test]
    async fn keys_are_counted_separately() {
        let limiter = RateLimiter::memory();
        assert!(limiter.allow("contact:a", 1, WINDOW).await.unwrap());
        assert!(!limiter.allow("contact:a", 1, WINDOW).await.unwrap());
        assert!(limiter.allow("contact:b", 1, WINDOW).await.unwrap());
        assert!(limiter.allow("github:a", 1, WINDOW).await.unwrap());
    }
}

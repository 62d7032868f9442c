use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::cache::models::CacheEntry;

/// 进程内 TTL 缓存，包装异步取数操作
///
/// 没有淘汰策略也没有容量上限，键空间很小且随进程生命周期存在。
/// 锁只在读写表时持有，`compute` 执行期间释放；同一个键并发未命中时
/// 可能各自计算一次，后写入者覆盖。
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 命中且未过期时直接返回缓存值，否则调用 `compute` 并写入
    ///
    /// `compute` 失败时错误原样返回，不写入任何条目，旧值保留到下次重试。
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        compute: F,
        ttl: Duration,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get_fresh(key) {
            tracing::debug!("Cache hit: {}", key);
            return Ok(value);
        }

        tracing::debug!("Cache miss: {}", key);
        let value = compute().await?;

        self.entries.lock().insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(value)
    }

    fn get_fresh(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    #[cfg(test)]
    fn stored(&self, key: &str) -> Option<V> {
        self.entries.lock().get(key).map(|entry| entry.value.clone())
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

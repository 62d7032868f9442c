use std::sync::LazyLock;
use std::time::Duration;

use redis::Script;
use redis::aio::ConnectionManager;

use crate::cache::keys::redis_rate_limit_key;

/// 固定窗口计数：已达上限直接拒绝且不计数，否则 INCR，首个请求设置窗口过期
const FIXED_WINDOW_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if current and tonumber(current) >= tonumber(ARGV[1]) then
    return 0
end
local count = redis.call('INCR', KEYS[1])
if count == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[2])
end
return 1
"#;

static FIXED_WINDOW: LazyLock<Script> = LazyLock::new(|| Script::new(FIXED_WINDOW_SCRIPT));

/// 速率限制缓存操作
pub struct RateLimitCacheOperations;

impl RateLimitCacheOperations {
    /// 在 Redis 中原子地记录一次请求，返回是否放行
    ///
    /// `ConnectionManager` 内部共享一条多路复用连接，clone 开销很小，断线时自动重连。
    pub async fn hit(
        conn: &ConnectionManager,
        key: &str,
        max_requests: u32,
        window: Duration,
    ) -> Result<bool, redis::RedisError> {
        let mut conn = conn.clone();

        let allowed: i32 = FIXED_WINDOW
            .key(redis_rate_limit_key(key))
            .arg(max_requests)
            .arg(window.as_millis().max(1) as u64)
            .invoke_async(&mut conn)
            .await?;

        Ok(allowed == 1)
    }
}

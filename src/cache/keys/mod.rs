//! 缓存键模块
//! 上游统计数据与限流计数器的键

/// GitHub 统计缓存键
pub const GITHUB_STATS_KEY: &str = "github-stats";

/// WakaTime 统计缓存键
pub const WAKATIME_STATS_KEY: &str = "wakatime-stats";

/// Redis 限流键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成限流键，路由名 + 调用方标识
pub fn rate_limit_key(route: &str, client: &str) -> String {
    format!("{}:{}", route, client)
}

/// 生成 Redis 中的限流键
pub fn redis_rate_limit_key(key: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_keys() {
        let key = rate_limit_key("contact", "203.0.113.7");
        assert_eq!(key, "contact:203.0.113.7");
        assert_eq!(redis_rate_limit_key(&key), "rate_limit:contact:203.0.113.7");
    }
}

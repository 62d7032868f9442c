/// 缓存操作
/// Redis 上的限流计数操作
pub mod rate_limit;

pub use rate_limit::RateLimitCacheOperations;

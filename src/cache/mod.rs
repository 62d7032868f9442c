// 缓存模块
// 上游数据的 TTL 缓存与接口限流计数

pub mod keys;
pub mod limiter;
pub mod models;
pub mod operations;
pub mod ttl;

pub use limiter::{MemoryRateLimiter, RateLimiter};
pub use ttl::TtlCache;

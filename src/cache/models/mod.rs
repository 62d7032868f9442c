/// 缓存数据模型
pub mod entry;
pub mod rate_limit;

pub use entry::CacheEntry;
pub use rate_limit::RateLimitEntry;

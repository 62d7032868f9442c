use std::sync::Arc;

use config::Config;

use cache::{RateLimiter, TtlCache};
use models::{GithubStats, WakatimeStats};

pub mod cache;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod models;
pub mod result;
pub mod router;
pub mod routes;
pub mod stats;
pub mod utils;

pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub limiter: Arc<RateLimiter>,
    pub github_cache: Arc<TtlCache<GithubStats>>,
    pub wakatime_cache: Arc<TtlCache<WakatimeStats>>,
}

impl AppState {
    /// 使用进程内限流器
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        Self::with_limiter(config, RateLimiter::memory())
    }

    pub fn with_limiter(config: Config, limiter: RateLimiter) -> Result<Self, reqwest::Error> {
        Ok(Self {
            config: Arc::new(config),
            http: infrastructure::build_http_client()?,
            limiter: Arc::new(limiter),
            github_cache: Arc::new(TtlCache::new()),
            wakatime_cache: Arc::new(TtlCache::new()),
        })
    }
}

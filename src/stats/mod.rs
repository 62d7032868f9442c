//! 统计数据获取：凭据检查 -> TTL 缓存 -> 上游请求，失败时显式回退到展示数据

use std::time::Duration;

use crate::AppState;
use crate::cache::keys::{GITHUB_STATS_KEY, WAKATIME_STATS_KEY};
use crate::error::ErrorCode;
use crate::infrastructure::{GithubClient, UpstreamError, WakatimeClient};
use crate::models::{GithubStats, WakatimeStats};

pub const GITHUB_TTL: Duration = Duration::from_secs(6 * 60 * 60);
pub const WAKATIME_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats<T> {
    pub data: T,
    pub source: Source,
}

/// 上游结果与展示数据之间的唯一分支
pub fn with_fallback<T>(
    result: Result<T, UpstreamError>,
    demo: impl FnOnce() -> T,
) -> Stats<T> {
    match result {
        Ok(data) => Stats {
            data,
            source: Source::Live,
        },
        Err(UpstreamError::NotConfigured(service)) => {
            tracing::debug!("{} not configured, serving demo data", service);
            Stats {
                data: demo(),
                source: Source::Demo,
            }
        }
        Err(err) => {
            tracing::warn!(code = %ErrorCode::ExternalApiError, "{}, serving demo data", err);
            Stats {
                data: demo(),
                source: Source::Demo,
            }
        }
    }
}

pub async fn github_stats(state: &AppState) -> Stats<GithubStats> {
    let result = match GithubClient::from_config(&state.http, &state.config) {
        Ok(client) => {
            state
                .github_cache
                .get_or_compute(GITHUB_STATS_KEY, || client.fetch_stats(), GITHUB_TTL)
                .await
        }
        Err(err) => Err(err),
    };
    with_fallback(result, GithubStats::demo)
}

pub async fn wakatime_stats(state: &AppState) -> Stats<WakatimeStats> {
    let result = match WakatimeClient::from_config(&state.http, &state.config) {
        Ok(client) => {
            state
                .wakatime_cache
                .get_or_compute(WAKATIME_STATS_KEY, || client.fetch_stats(), WAKATIME_TTL)
                .await
        }
        Err(err) => Err(err),
    };
    with_fallback(result, WakatimeStats::demo)
}

use axum::{
    Json,
    extract::State,
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};
use futures_util::future::join;

use crate::{
    AppState,
    models::{AnalyticsStats, DashboardStats, TypingStats},
    result::ApiResult,
    stats,
    utils::cache_control,
};

/// 仪表盘一次取齐四组数据，GitHub 与 WakaTime 并发获取
#[axum::debug_handler]
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let (github, wakatime) = join(stats::github_stats(&state), stats::wakatime_stats(&state)).await;

    let dashboard = DashboardStats {
        github: github.data,
        wakatime: wakatime.data,
        analytics: AnalyticsStats::demo(),
        typing: TypingStats::demo(),
    };
    (
        [(CACHE_CONTROL, cache_control::ONE_HOUR)],
        Json(ApiResult::success(dashboard)),
    )
}

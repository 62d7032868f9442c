use axum::{
    Json,
    extract::State,
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};

use crate::{
    AppState,
    result::ApiResult,
    stats::{self, Source},
    utils::cache_control,
};

#[axum::debug_handler]
pub async fn get_github_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = stats::github_stats(&state).await;
    let max_age = match stats.source {
        Source::Live => cache_control::SIX_HOURS,
        Source::Demo => cache_control::ONE_HOUR,
    };
    ([(CACHE_CONTROL, max_age)], Json(ApiResult::success(stats.data)))
}

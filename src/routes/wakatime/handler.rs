use axum::{
    Json,
    extract::State,
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};

use crate::{AppState, result::ApiResult, stats, utils::cache_control};

#[axum::debug_handler]
pub async fn get_wakatime_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = stats::wakatime_stats(&state).await;
    (
        [(CACHE_CONTROL, cache_control::ONE_HOUR)],
        Json(ApiResult::success(stats.data)),
    )
}

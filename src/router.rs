use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{MethodRouter, get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    cache::RateLimiter,
    config::Config,
    middleware::{
        CONTACT_POLICY, DASHBOARD_POLICY, GITHUB_POLICY, RouteLimit, RoutePolicy,
        WAKATIME_POLICY, log_errors, rate_limit,
    },
    routes,
};

fn rate_limited(
    limiter: &Arc<RateLimiter>,
    policy: RoutePolicy,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(axum::middleware::from_fn_with_state(
        RouteLimit::new(limiter.clone(), policy),
        rate_limit,
    ))
}

/// 开发模式允许任意来源，生产模式只允许站点本身
fn cors_layer(config: &Config) -> CorsLayer {
    if cfg!(debug_assertions) {
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(&config.site_url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!("SITE_URL is not a valid origin header, CORS disabled");
            CorsLayer::new()
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let limiter = &state.limiter;

    Router::new()
        .route(
            "/api/contact",
            rate_limited(limiter, CONTACT_POLICY, post(routes::contact::submit_contact)),
        )
        .route(
            "/api/github",
            rate_limited(limiter, GITHUB_POLICY, get(routes::github::get_github_stats)),
        )
        .route(
            "/api/wakatime",
            rate_limited(limiter, WAKATIME_POLICY, get(routes::wakatime::get_wakatime_stats)),
        )
        .route(
            "/api/dashboard",
            rate_limited(limiter, DASHBOARD_POLICY, get(routes::dashboard::get_dashboard)),
        )
        .route("/api/health", get(routes::health::health_check))
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(log_errors))
                .layer(cors_layer(&state.config)),
        )
        .with_state(state)
}

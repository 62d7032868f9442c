use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::cache::RateLimiter;
use crate::cache::keys::rate_limit_key;
use crate::error::AppError;
use crate::utils::client_ip;

/// 单个路由的限流参数
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub route: &'static str,
    pub max_requests: u32,
    pub window: Duration,
    pub message: &'static str,
}

pub const CONTACT_POLICY: RoutePolicy = RoutePolicy {
    route: "contact",
    max_requests: 5,
    window: Duration::from_secs(60),
    message: "Too many requests. Please try again later.",
};

pub const GITHUB_POLICY: RoutePolicy = RoutePolicy {
    route: "github",
    max_requests: 30,
    window: Duration::from_secs(60),
    message: "Too many requests",
};

pub const WAKATIME_POLICY: RoutePolicy = RoutePolicy {
    route: "wakatime",
    max_requests: 30,
    window: Duration::from_secs(60),
    message: "Too many requests",
};

pub const DASHBOARD_POLICY: RoutePolicy = RoutePolicy {
    route: "dashboard",
    max_requests: 30,
    window: Duration::from_secs(60),
    message: "Too many requests",
};

#[derive(Clone)]
pub struct RouteLimit {
    limiter: Arc<RateLimiter>,
    policy: RoutePolicy,
}

impl RouteLimit {
    pub fn new(limiter: Arc<RateLimiter>, policy: RoutePolicy) -> Self {
        Self { limiter, policy }
    }

    pub async fn check_rate_limit(&self, req: Request, next: Next) -> Response {
        let ip = client_ip(&req);
        let key = rate_limit_key(self.policy.route, &ip);

        match self
            .limiter
            .allow(&key, self.policy.max_requests, self.policy.window)
            .await
        {
            Ok(true) => next.run(req).await,
            Ok(false) => {
                tracing::debug!("Rate limit exceeded: {}", key);
                AppError::RateLimited(self.policy.message.to_string()).into_response()
            }
            Err(e) => AppError::Internal(format!("rate limiter backend failed: {}", e))
                .into_response(),
        }
    }
}

pub async fn rate_limit(State(limit): State<RouteLimit>, req: Request, next: Next) -> Response {
    limit.check_rate_limit(req, next).await
}

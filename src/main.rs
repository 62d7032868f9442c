use std::net::{IpAddr, SocketAddr};

use portfolio_backend::{AppState, cache::RateLimiter, config::Config, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with permissive CORS");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode, CORS restricted to {}", config.site_url);

    tracing::info!(
        github = config.github.is_some(),
        wakatime = config.wakatime_api_key.is_some(),
        contact_email = config.contact_email.is_some(),
        error_reporting = config.error_reporting_dsn.is_some(),
        "Integrations configured (unconfigured ones serve demo data)"
    );

    // 配置了 Redis 时限流计数放到 Redis，多实例共享窗口
    let limiter = match config.redis_url.as_deref() {
        Some(url) => {
            let client = redis::Client::open(url).expect("Failed to create Redis client");
            let limiter = RateLimiter::redis(client)
                .await
                .expect("Failed to connect to Redis");
            tracing::info!("Rate limiter backed by Redis");
            limiter
        }
        None => RateLimiter::memory(),
    };

    let state = AppState::with_limiter(config, limiter).expect("Failed to build HTTP client");

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}

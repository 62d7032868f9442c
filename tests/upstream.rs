use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use portfolio_backend::{
    AppState,
    config::{Config, GithubCredentials},
    create_router,
    models::{GithubStats, WakatimeStats},
    result::ApiResult,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn github_config(server: &MockServer) -> Config {
    Config {
        github: Some(GithubCredentials {
            token: "ghp_test".into(),
            username: "octocat".into(),
        }),
        github_api_url: server.uri(),
        ..Config::default()
    }
}

fn wakatime_config(server: &MockServer) -> Config {
    Config {
        wakatime_api_key: Some("waka_test".into()),
        wakatime_api_url: server.uri(),
        ..Config::default()
    }
}

async fn call<T: DeserializeOwned>(
    app: &axum::Router,
    uri: &str,
) -> (StatusCode, Option<String>, ApiResult<T>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache_control, serde_json::from_slice(&bytes).unwrap())
}

fn graphql_body() -> serde_json::Value {
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "totalCommitContributions": 321,
                    "contributionCalendar": {
                        "totalContributions": 654,
                        "weeks": [
                            { "contributionDays": [
                                { "contributionCount": 1 },
                                { "contributionCount": 9 }
                            ]}
                        ]
                    }
                },
                "repositories": {
                    "nodes": [
                        { "languages": { "edges": [
                            { "size": 300, "node": { "name": "Rust", "color": "#dea584" } },
                            { "size": 100, "node": { "name": "Go", "color": "#00ADD8" } }
                        ]}}
                    ]
                }
            }
        }
    })
}

#[tokio::test]
async fn github_live_stats_are_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header_eq("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "public_repos": 12 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_body()))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(github_config(&server)).unwrap());

    let (status, cache_control, body) = call::<GithubStats>(&app, "/api/github").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("public, s-maxage=21600"));
    let stats = body.data.unwrap();
    assert_eq!(stats.total_contributions, 654);
    assert_eq!(stats.total_commits, 321);
    assert_eq!(stats.public_repos, 12);
    assert_eq!(stats.contribution_calendar, vec![vec![1, 4]]);
    assert_eq!(stats.top_languages[0].name, "Rust");
    assert_eq!(stats.top_languages[0].percentage, 75);
    assert_eq!(stats.top_languages[1].percentage, 25);

    // 六小时内再次请求不会打到上游，expect(1) 在 server 销毁时校验
    let (_, _, again) = call::<GithubStats>(&app, "/api/github").await;
    assert_eq!(again.data.unwrap(), stats);
}

#[tokio::test]
async fn github_failure_falls_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_body()))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(github_config(&server)).unwrap());
    let (status, cache_control, body) = call::<GithubStats>(&app, "/api/github").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("public, s-maxage=3600"));
    assert!(body.success);
    assert_eq!(body.data.unwrap(), GithubStats::demo());
}

#[tokio::test]
async fn github_graphql_errors_fall_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "public_repos": 1 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "user": null },
            "errors": [{ "message": "Could not resolve to a User" }]
        })))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(github_config(&server)).unwrap());
    let (_, _, body) = call::<GithubStats>(&app, "/api/github").await;
    assert_eq!(body.data.unwrap(), GithubStats::demo());
}

#[tokio::test]
async fn wakatime_live_stats_use_basic_auth() {
    let server = MockServer::start().await;
    let auth = format!("Basic {}", STANDARD.encode("waka_test"));
    Mock::given(method("GET"))
        .and(path("/users/current/stats/last_7_days"))
        .and(header_eq("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "total_seconds": 36000.0,
                "human_readable_daily_average": "1h 26m",
                "languages": [
                    { "name": "JavaScript", "total_seconds": 21600.0 },
                    { "name": "Rust", "total_seconds": 14400.0 }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(wakatime_config(&server)).unwrap());
    let (status, cache_control, body) = call::<WakatimeStats>(&app, "/api/wakatime").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("public, s-maxage=3600"));

    let stats = body.data.unwrap();
    assert_eq!(stats.total_hours, 10);
    assert_eq!(stats.daily_average, "1h 26m");
    assert_eq!(stats.top_language, "JavaScript");
    assert_eq!(stats.languages[0].color, "#f7df1e");
    assert_eq!(stats.languages[1].hours, 4);

    let (_, _, again) = call::<WakatimeStats>(&app, "/api/wakatime").await;
    assert_eq!(again.data.unwrap(), stats);
}

#[tokio::test]
async fn wakatime_malformed_payload_falls_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/current/stats/last_7_days"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(wakatime_config(&server)).unwrap());
    let (status, _, body) = call::<WakatimeStats>(&app, "/api/wakatime").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.data.unwrap(), WakatimeStats::demo());
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/current/stats/last_7_days"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/current/stats/last_7_days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "total_seconds": 7200.0, "languages": [] }
        })))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(wakatime_config(&server)).unwrap());
    let (_, _, first) = call::<WakatimeStats>(&app, "/api/wakatime").await;
    assert_eq!(first.data.unwrap(), WakatimeStats::demo());

    // 失败不缓存，第二次直接取到线上数据
    let (_, _, second) = call::<WakatimeStats>(&app, "/api/wakatime").await;
    let stats = second.data.unwrap();
    assert_eq!(stats.total_hours, 2);
    assert_eq!(stats.top_language, "N/A");
}

//! 上游数据源客户端，统一返回 `Result<_, UpstreamError>`，由调用方决定是否回退到展示数据

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod github;
pub mod wakatime;

pub use github::GithubClient;
pub use wakatime::WakatimeClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0} credentials are not configured")]
    NotConfigured(&'static str),
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} responded with {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },
    #[error("unexpected {service} payload: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}

/// 所有上游请求共用的 HTTP 客户端，GitHub 要求必须带 User-Agent
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("portfolio-backend/", env!("CARGO_PKG_VERSION")))
        .build()
}

async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Result<Response, reqwest::Error>,
) -> Result<T, UpstreamError> {
    let response = response.map_err(|source| UpstreamError::Http { service, source })?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status { service, status });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::Malformed {
            service,
            reason: e.to_string(),
        })
}

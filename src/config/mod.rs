use std::env;

use thiserror::Error;

use crate::utils::is_valid_email;

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WAKATIME_API_URL: &str = "https://wakatime.com/api/v1";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("SITE_URL must be an http(s) URL, got `{0}`")]
    InvalidSiteUrl(String),
    #[error("ERROR_REPORTING_DSN must be an http(s) URL, got `{0}`")]
    InvalidErrorReportingDsn(String),
    #[error("CONTACT_EMAIL is not a valid email address: `{0}`")]
    InvalidContactEmail(String),
}

#[derive(Debug, Clone)]
pub struct GithubCredentials {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub site_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub github: Option<GithubCredentials>,
    pub github_api_url: String,
    pub wakatime_api_key: Option<String>,
    pub wakatime_api_url: String,
    pub contact_email: Option<String>,
    pub error_reporting_dsn: Option<String>,
    pub redis_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.into(),
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            github: None,
            github_api_url: DEFAULT_GITHUB_API_URL.into(),
            wakatime_api_key: None,
            wakatime_api_url: DEFAULT_WAKATIME_API_URL.into(),
            contact_email: None,
            error_reporting_dsn: None,
            redis_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        // 开发环境只警告不退出，生产环境配置错误直接终止启动
        let validation = if cfg!(debug_assertions) {
            Validation::Lenient
        } else {
            Validation::Strict
        };
        Self::from_lookup_with(|name| env::var(name).ok(), validation)
    }

    /// 从任意键值来源构建配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, Validation::Strict)
    }

    pub fn from_lookup_with<F>(lookup: F, validation: Validation) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let site_url = match var("SITE_URL") {
            Some(url) if !is_http_url(&url) => {
                validation.reject(ConfigError::InvalidSiteUrl(url), defaults.site_url)?
            }
            url => url.unwrap_or(defaults.site_url),
        };

        let error_reporting_dsn = match var("ERROR_REPORTING_DSN") {
            Some(dsn) if !is_http_url(&dsn) => {
                validation.reject(ConfigError::InvalidErrorReportingDsn(dsn), None)?
            }
            dsn => dsn,
        };

        let contact_email = match var("CONTACT_EMAIL") {
            Some(email) if !is_valid_email(&email) => {
                validation.reject(ConfigError::InvalidContactEmail(email), None)?
            }
            email => email,
        };

        // token 和 username 缺一不可
        let github = match (var("GITHUB_TOKEN"), var("GITHUB_USERNAME")) {
            (Some(token), Some(username)) => Some(GithubCredentials { token, username }),
            _ => None,
        };

        Ok(Config {
            site_url: site_url.trim_end_matches('/').to_string(),
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: var("SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.server_port),
            github,
            github_api_url: var("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            wakatime_api_key: var("WAKATIME_API_KEY"),
            wakatime_api_url: var("WAKATIME_API_URL").unwrap_or(defaults.wakatime_api_url),
            contact_email,
            error_reporting_dsn,
            redis_url: var("REDIS_URL"),
        })
    }
}

/// 配置值非法时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// 返回错误，启动失败
    Strict,
    /// 记录警告并使用默认值
    Lenient,
}

impl Validation {
    fn reject<T>(self, err: ConfigError, fallback: T) -> Result<T, ConfigError> {
        match self {
            Validation::Strict => Err(err),
            Validation::Lenient => {
                tracing::warn!("Invalid configuration: {}, using default", err);
                Ok(fallback)
            }
        }
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, read_json};
use crate::config::Config;
use crate::models::{LanguageHours, WakatimeStats, demo_weekly_activity, language_color};

const SERVICE: &str = "wakatime";
const TOP_LANGUAGES: usize = 6;
const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Deserialize)]
struct StatsResponse {
    data: StatsData,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    #[serde(default)]
    total_seconds: f64,
    human_readable_daily_average: Option<String>,
    #[serde(default)]
    languages: Vec<LanguageTime>,
}

#[derive(Debug, Deserialize)]
struct LanguageTime {
    name: String,
    #[serde(default)]
    total_seconds: f64,
}

#[derive(Clone)]
pub struct WakatimeClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl WakatimeClient {
    pub fn from_config(http: &Client, config: &Config) -> Result<Self, UpstreamError> {
        let api_key = config
            .wakatime_api_key
            .clone()
            .ok_or(UpstreamError::NotConfigured(SERVICE))?;
        Ok(Self {
            http: http.clone(),
            api_url: config.wakatime_api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// 最近七天的编码时长统计
    pub async fn fetch_stats(&self) -> Result<WakatimeStats, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/users/current/stats/last_7_days", self.api_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode(&self.api_key)),
            )
            .send()
            .await;
        let stats: StatsResponse = read_json(SERVICE, response).await?;
        Ok(summarize(stats.data))
    }
}

fn hours(seconds: f64) -> u64 {
    (seconds / SECONDS_PER_HOUR).round().max(0.0) as u64
}

fn summarize(data: StatsData) -> WakatimeStats {
    let top_language = data
        .languages
        .first()
        .map(|lang| lang.name.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let daily_average = data
        .human_readable_daily_average
        .filter(|avg| !avg.is_empty())
        .unwrap_or_else(|| "0h 0m".to_string());

    let languages = data
        .languages
        .iter()
        .take(TOP_LANGUAGES)
        .map(|lang| LanguageHours {
            name: lang.name.clone(),
            hours: hours(lang.total_seconds),
            color: language_color(&lang.name).to_string(),
        })
        .collect();

    WakatimeStats {
        total_hours: hours(data.total_seconds),
        daily_average,
        top_language,
        languages,
        weekly_activity: demo_weekly_activity(),
    }
}

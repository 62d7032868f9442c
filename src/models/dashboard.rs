use serde::{Deserialize, Serialize};

use super::{GithubStats, WakatimeStats};

/// 站点访问统计，目前只有展示数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub live_visitors: u64,
    pub traffic: Vec<MonthlyViews>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyViews {
    pub month: String,
    pub views: u64,
}

/// 打字测试成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStats {
    pub wpm: u32,
    pub accuracy: f64,
    pub best_score: u32,
    pub average_wpm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub github: GithubStats,
    pub wakatime: WakatimeStats,
    pub analytics: AnalyticsStats,
    pub typing: TypingStats,
}

impl AnalyticsStats {
    pub fn demo() -> Self {
        let traffic = [
            ("Jan", 1200),
            ("Feb", 1450),
            ("Mar", 1100),
            ("Apr", 1680),
            ("May", 1920),
            ("Jun", 2100),
            ("Jul", 1850),
            ("Aug", 2350),
            ("Sep", 2680),
            ("Oct", 2450),
            ("Nov", 2890),
            ("Dec", 3200),
        ]
        .into_iter()
        .map(|(month, views)| MonthlyViews {
            month: month.into(),
            views,
        })
        .collect();

        Self {
            page_views: 15420,
            unique_visitors: 8930,
            live_visitors: 12,
            traffic,
        }
    }
}

impl TypingStats {
    pub fn demo() -> Self {
        Self {
            wpm: 95,
            accuracy: 97.5,
            best_score: 112,
            average_wpm: 88,
        }
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE_COLOR: &str = "#6c5ce7";

/// 日历格子上限，对应前端的五档颜色
pub const MAX_CALENDAR_LEVEL: u8 = 4;

const DEMO_WEEKS: usize = 52;
const DEMO_DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub total_contributions: u64,
    pub total_commits: u64,
    pub public_repos: u64,
    pub top_languages: Vec<LanguageShare>,
    pub contribution_calendar: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: u32,
    pub color: String,
}

impl LanguageShare {
    fn new(name: &str, percentage: u32, color: &str) -> Self {
        Self {
            name: name.into(),
            percentage,
            color: color.into(),
        }
    }
}

impl GithubStats {
    /// 未配置或上游失败时展示的固定数据
    pub fn demo() -> Self {
        let contribution_calendar = (0..DEMO_WEEKS)
            .map(|week| {
                (0..DEMO_DAYS_PER_WEEK)
                    .map(|day| ((week * 31 + day * 17 + 3) % 5) as u8)
                    .collect()
            })
            .collect();

        Self {
            total_contributions: 2847,
            total_commits: 1532,
            public_repos: 48,
            top_languages: vec![
                LanguageShare::new("TypeScript", 42, "#3178c6"),
                LanguageShare::new("JavaScript", 25, "#f7df1e"),
                LanguageShare::new("Python", 18, "#3776ab"),
                LanguageShare::new("CSS", 8, "#264de4"),
                LanguageShare::new("Others", 7, DEFAULT_LANGUAGE_COLOR),
            ],
            contribution_calendar,
        }
    }
}

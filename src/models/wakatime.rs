use serde::{Deserialize, Serialize};

use super::github::DEFAULT_LANGUAGE_COLOR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WakatimeStats {
    pub total_hours: u64,
    pub daily_average: String,
    pub top_language: String,
    pub languages: Vec<LanguageHours>,
    pub weekly_activity: Vec<DailyActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageHours {
    pub name: String,
    pub hours: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day: String,
    pub hours: f64,
}

/// 语言配色，未收录的语言统一用默认色
pub fn language_color(name: &str) -> &'static str {
    match name {
        "TypeScript" => "#3178c6",
        "JavaScript" => "#f7df1e",
        "Python" => "#3776ab",
        "CSS" => "#264de4",
        "HTML" => "#e34f26",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

impl LanguageHours {
    fn new(name: &str, hours: u64, color: &str) -> Self {
        Self {
            name: name.into(),
            hours,
            color: color.into(),
        }
    }
}

/// 免费版 WakaTime 没有按天明细，线上数据也沿用这组周分布
pub fn demo_weekly_activity() -> Vec<DailyActivity> {
    [
        ("Mon", 6.2),
        ("Tue", 7.5),
        ("Wed", 5.8),
        ("Thu", 8.1),
        ("Fri", 6.9),
        ("Sat", 4.2),
        ("Sun", 3.5),
    ]
    .into_iter()
    .map(|(day, hours)| DailyActivity {
        day: day.into(),
        hours,
    })
    .collect()
}

impl WakatimeStats {
    pub fn demo() -> Self {
        Self {
            total_hours: 1847,
            daily_average: "5h 23m".into(),
            top_language: "TypeScript".into(),
            languages: vec![
                LanguageHours::new("TypeScript", 780, "#3178c6"),
                LanguageHours::new("JavaScript", 420, "#f7df1e"),
                LanguageHours::new("Python", 320, "#3776ab"),
                LanguageHours::new("CSS/SCSS", 180, "#264de4"),
                LanguageHours::new("HTML", 90, "#e34f26"),
                LanguageHours::new("Others", 57, DEFAULT_LANGUAGE_COLOR),
            ],
            weekly_activity: demo_weekly_activity(),
        }
    }
}

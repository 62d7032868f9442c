mod dashboard;
mod github;
mod wakatime;

pub use dashboard::{AnalyticsStats, DashboardStats, MonthlyViews, TypingStats};
pub use github::{DEFAULT_LANGUAGE_COLOR, GithubStats, LanguageShare, MAX_CALENDAR_LEVEL};
pub use wakatime::{
    DailyActivity, LanguageHours, WakatimeStats, demo_weekly_activity, language_color,
};

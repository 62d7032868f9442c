mod error_handler;
mod rate_limit;

pub use error_handler::log_errors;
pub use rate_limit::{
    CONTACT_POLICY, DASHBOARD_POLICY, GITHUB_POLICY, RouteLimit, RoutePolicy, WAKATIME_POLICY,
    rate_limit,
};

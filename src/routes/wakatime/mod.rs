mod handler;

pub use handler::get_wakatime_stats;

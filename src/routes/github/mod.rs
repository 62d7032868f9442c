mod handler;

pub use handler::get_github_stats;

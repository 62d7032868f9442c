mod handler;

pub use handler::{HealthStatus, health_check};

//! Business logic services.

pub mod auth;
pub mod chart;
pub mod clock;
pub mod dashboard;
pub mod metrics;
pub mod project;
pub mod task_stats;
pub mod window;

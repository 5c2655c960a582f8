//! Database models and DTOs for all domain entities.

pub mod employee;
pub mod pagination;
pub mod project;
pub mod task;
pub mod user;

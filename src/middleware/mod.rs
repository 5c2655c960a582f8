//! Request extractors for sessions and role checks.

pub mod auth;
pub mod rbac;

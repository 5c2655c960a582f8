//! Employee view of a user row, as consumed by dashboard aggregation.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::UserRole;

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRecord {
    pub user_id: Uuid,
    /// Free-form text in storage; see [`parse_salary`].
    pub salary: Option<String>,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub role: UserRole,
}

impl EmployeeRecord {
    pub fn salary_amount(&self) -> i64 {
        self.salary.as_deref().map(parse_salary).unwrap_or(0)
    }
}

/// Leading integer portion of a salary string; anything unparsable is 0.
///
/// `"2000"` → 2000, `" 2000.75"` → 2000, `"12abc"` → 12, `""` → 0.
pub fn parse_salary(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

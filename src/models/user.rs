//! User model. Every employee of a company is a user row scoped by `company_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    SeniorEmployee,
    AssignedEmployee,
}

impl UserRole {
    /// Wire name used inside JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SeniorEmployee => "senior_employee",
            Self::AssignedEmployee => "assigned_employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "senior_employee" => Some(Self::SeniorEmployee),
            "assigned_employee" => Some(Self::AssignedEmployee),
            _ => None,
        }
    }
}

/// Full user row from database (includes password_hash: never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub salary: Option<String>,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO: excludes password_hash and internal fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            company_id: u.company_id,
            name: u.name,
            email: u.email,
            role: u.role,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

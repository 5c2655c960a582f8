//! Project model and the list DTOs served by the project endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "project_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    ToDo,
    InProgress,
    Review,
    Completed,
    Hold,
}

/// Project row as read by the dashboard aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub budget: Option<i32>,
    pub extra_cost: i32,
    pub status: ProjectStatus,
    pub company_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Date a project counts from: its start date, else its creation time.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.start_date.unwrap_or(self.created_at)
    }

    pub fn budget_amount(&self) -> i64 {
        self.budget.map(i64::from).unwrap_or(0)
    }
}

/// Project list entry annotated with task and assignee counts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Option<i32>,
    pub extra_cost: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub task_count: i64,
    pub employee_count: i64,
}

//! Dashboard queries: tenant-scoped record fetches feeding the pure
//! aggregation in [`metrics`](super::metrics), [`chart`](super::chart) and
//! [`task_stats`](super::task_stats).
//!
//! SQL date predicates only narrow the fetch; window membership is decided
//! again in Rust.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::employee::EmployeeRecord;
use crate::models::project::ProjectRecord;
use crate::models::task::TaskRecord;
use crate::services::chart::{self, ProjectChartData};
use crate::services::metrics::{self, ChangePolicy, DashboardMetrics};
use crate::services::task_stats::TaskStats;
use crate::services::window::{ChartTimeframe, MetricsTimeframe};

/// Payload of `GET /api/project/get-project-stats/{projectId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTaskStats {
    pub project_id: Uuid,
    pub project_name: String,
    #[serde(flatten)]
    pub stats: TaskStats,
}

/// Company dashboard cards for the requested timeframe.
pub async fn get_dashboard_metrics(
    pool: &PgPool,
    ctx: &AuthContext,
    timeframe: MetricsTimeframe,
    now: DateTime<Utc>,
    policy: ChangePolicy,
) -> Result<DashboardMetrics, AppError> {
    let windows = timeframe.windows(now);
    let from = windows
        .previous
        .map(|w| w.start)
        .unwrap_or(windows.current.start);
    let to = windows.current.end;

    let (projects, employees) = tokio::try_join!(
        fetch_projects_between(pool, ctx.company_id, from, to),
        fetch_employees_between(pool, ctx.company_id, from, to),
    )?;

    tracing::debug!(
        company_id = %ctx.company_id,
        timeframe = ?timeframe,
        projects = projects.len(),
        employees = employees.len(),
        "Computing dashboard metrics"
    );

    Ok(metrics::build_dashboard_metrics(
        ctx.company_id,
        &windows,
        &projects,
        &employees,
        policy,
    ))
}

/// Per-day project counts over the chart window.
pub async fn get_project_chart_data(
    pool: &PgPool,
    ctx: &AuthContext,
    timeframe: ChartTimeframe,
    now: DateTime<Utc>,
) -> Result<ProjectChartData, AppError> {
    let window = timeframe.window(now);
    let projects = fetch_started_projects_between(pool, ctx.company_id, window.start, window.end).await?;

    tracing::debug!(
        company_id = %ctx.company_id,
        timeframe = %timeframe,
        projects = projects.len(),
        "Building project chart series"
    );

    Ok(chart::build_chart_data(ctx.company_id, timeframe, &window, &projects))
}

/// Task breakdown for one project of the caller's company.
///
/// A project owned by another company is reported exactly like a missing one.
pub async fn get_project_stats(
    pool: &PgPool,
    ctx: &AuthContext,
    project_id: Uuid,
    start_of_today: DateTime<Utc>,
) -> Result<ProjectTaskStats, AppError> {
    let project_name = sqlx::query_scalar::<_, String>(
        "SELECT name FROM projects WHERE id = $1 AND company_id = $2",
    )
    .bind(project_id)
    .bind(ctx.company_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let tasks = sqlx::query_as::<_, TaskRecord>(
        "SELECT id, project_id, status, end_date FROM tasks WHERE project_id = $1",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(ProjectTaskStats {
        project_id,
        project_name,
        stats: TaskStats::compute(&tasks, start_of_today),
    })
}

/// Projects whose effective date (start, else creation) falls in `[from, to]`.
async fn fetch_projects_between(
    pool: &PgPool,
    company_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<ProjectRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProjectRecord>(
        r#"
        SELECT id, name, budget, extra_cost, status, company_id, start_date, created_at
        FROM projects
        WHERE company_id = $1
          AND COALESCE(start_date, created_at) >= $2
          AND COALESCE(start_date, created_at) <= $3
        "#,
    )
    .bind(company_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Projects with a non-null start date in `[from, to]`.
async fn fetch_started_projects_between(
    pool: &PgPool,
    company_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<ProjectRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProjectRecord>(
        r#"
        SELECT id, name, budget, extra_cost, status, company_id, start_date, created_at
        FROM projects
        WHERE company_id = $1
          AND start_date IS NOT NULL
          AND start_date >= $2
          AND start_date <= $3
        ORDER BY start_date
        "#,
    )
    .bind(company_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Company users created in `[from, to]`.
async fn fetch_employees_between(
    pool: &PgPool,
    company_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<EmployeeRecord>, AppError> {
    let rows = sqlx::query_as::<_, EmployeeRecord>(
        r#"
        SELECT id AS user_id, salary, company_id, created_at, role
        FROM users
        WHERE company_id = $1
          AND created_at >= $2
          AND created_at <= $3
        "#,
    )
    .bind(company_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

//! Project lists annotated with task and assigned-employee counts.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{Paged, Pagination};
use crate::models::project::ProjectSummary;

/// Query for `GET /api/project/get-recent-projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentProjectsQuery {
    pub limit: Option<i64>,
}

impl RecentProjectsQuery {
    const DEFAULT_LIMIT: i64 = 5;
    const MAX_LIMIT: i64 = 20;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT
        p.id, p.name, p.description, p.status, p.budget, p.extra_cost,
        p.start_date, p.end_date, p.created_at,
        (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id) AS task_count,
        (SELECT COUNT(*) FROM project_employees pe WHERE pe.project_id = p.id) AS employee_count
    FROM projects p
    WHERE p.company_id = $1
    ORDER BY p.created_at DESC
    LIMIT $2 OFFSET $3
"#;

/// Most recently created projects of a company.
pub async fn recent_projects(
    pool: &PgPool,
    company_id: Uuid,
    query: &RecentProjectsQuery,
) -> Result<Vec<ProjectSummary>, AppError> {
    let rows = sqlx::query_as::<_, ProjectSummary>(SUMMARY_SELECT)
        .bind(company_id)
        .bind(query.limit())
        .bind(0_i64)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All projects of a company, newest first, one page at a time.
pub async fn admin_projects(
    pool: &PgPool,
    company_id: Uuid,
    pagination: &Pagination,
) -> Result<Paged<ProjectSummary>, AppError> {
    let total_query = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE company_id = $1")
        .bind(company_id)
        .fetch_one(pool);
    let items_query = sqlx::query_as::<_, ProjectSummary>(SUMMARY_SELECT)
        .bind(company_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool);

    let (total, items) = tokio::try_join!(total_query, items_query)?;

    tracing::debug!(company_id = %company_id, total, page = pagination.current_page(), "Listed admin projects");
    Ok(Paged::new(items, total, pagination))
}

//! Project dashboard routes: chart series, task stats, project lists.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::AuthContext;
use crate::middleware::rbac::RequireAdmin;
use crate::models::pagination::{Paged, Pagination};
use crate::models::project::ProjectSummary;
use crate::services::chart::ProjectChartData;
use crate::services::dashboard::{self, ProjectTaskStats};
use crate::services::project::{self as project_service, RecentProjectsQuery};
use crate::services::window::ChartTimeframe;
use crate::AppState;

/// GET /api/project/get-project-chart-data/{timeframe}: dense per-day series.
pub async fn chart_data(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(timeframe): Path<String>,
) -> Result<Json<ApiResponse<ProjectChartData>>, AppError> {
    let timeframe: ChartTimeframe = timeframe.parse()?;
    let data =
        dashboard::get_project_chart_data(&state.db, &ctx, timeframe, state.clock.now()).await?;
    Ok(ApiResponse::success(data, "Project chart data fetched successfully"))
}

/// GET /api/project/get-project-stats/{projectId}: task breakdown for one project.
pub async fn project_stats(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<ProjectTaskStats>>, AppError> {
    // Malformed ids are indistinguishable from unknown ones.
    let project_id: Uuid = project_id
        .parse()
        .map_err(|_| AppError::NotFound("Project not found".to_string()))?;

    let stats =
        dashboard::get_project_stats(&state.db, &ctx, project_id, state.clock.start_of_today())
            .await?;
    Ok(ApiResponse::success(stats, "Project stats fetched successfully"))
}

/// GET /api/project/get-recent-projects: newest projects with counts.
pub async fn recent_projects(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<RecentProjectsQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectSummary>>>, AppError> {
    let projects = project_service::recent_projects(&state.db, ctx.company_id, &query).await?;
    Ok(ApiResponse::success(projects, "Recent projects fetched successfully"))
}

/// GET /api/project/get-admin-projects: paged company projects (admin only).
pub async fn admin_projects(
    State(state): State<AppState>,
    RequireAdmin(ctx): RequireAdmin,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paged<ProjectSummary>>>, AppError> {
    let page = project_service::admin_projects(&state.db, ctx.company_id, &pagination).await?;
    Ok(ApiResponse::success(page, "Projects fetched successfully"))
}

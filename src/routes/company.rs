//! Company dashboard routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::AuthContext;
use crate::services::dashboard;
use crate::services::metrics::DashboardMetrics;
use crate::services::window::MetricsTimeframe;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub timeframe: Option<String>,
}

/// GET /api/company/get-dashboard-metrics: project, employee, sales and
/// gross-profit cards. Unknown timeframes fall back to all-time.
pub async fn dashboard_metrics(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<ApiResponse<DashboardMetrics>>, AppError> {
    let timeframe = MetricsTimeframe::parse(query.timeframe.as_deref());
    let metrics = dashboard::get_dashboard_metrics(
        &state.db,
        &ctx,
        timeframe,
        state.clock.now(),
        state.config.change_policy,
    )
    .await?;
    Ok(ApiResponse::success(metrics, "Dashboard metrics fetched successfully"))
}

//! Route definitions for the ProjectDesk API.

pub mod auth;
pub mod company;
pub mod health;
pub mod project;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Request bodies are small JSON documents (login, refresh).
const MAX_BODY_BYTES: usize = 64 * 1024;

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url, "Invalid FRONTEND_URL, CORS origin not set");
            cors
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    let company_routes = Router::new().route(
        "/company/get-dashboard-metrics",
        get(company::dashboard_metrics),
    );

    let project_routes = Router::new()
        .route(
            "/project/get-project-chart-data/{timeframe}",
            get(project::chart_data),
        )
        .route(
            "/project/get-project-stats/{project_id}",
            get(project::project_stats),
        )
        .route(
            "/project/get-recent-projects",
            get(project::recent_projects),
        )
        .route(
            "/project/get-admin-projects",
            get(project::admin_projects),
        );

    let api = auth_routes.merge(company_routes).merge(project_routes);
    let cors = cors_layer(&state.config.frontend_url);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

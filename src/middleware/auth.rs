//! Session extractor resolving a JWT into an explicit [`AuthContext`].

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::services::auth as auth_service;
use crate::AppState;

/// Cookie carrying the access token for browser clients.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated caller scoped to a single company.
///
/// Use as an Axum extractor in handlers that require a session:
/// ```ignore
/// async fn handler(ctx: AuthContext) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub role: UserRole,
}

/// Bearer header first, then the session cookie.
fn token_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    })
}

impl AuthContext {
    /// Resolve claims from an access token, requiring a company.
    pub fn from_token(token: &str, jwt_secret: &str) -> Result<Self, AppError> {
        let claims = auth_service::validate_token(token, jwt_secret)?;
        if claims.token_type != "access" {
            return Err(AppError::Unauthorized);
        }

        let user_id: Uuid = claims
            .user_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        let company_id: Uuid = claims
            .company_id
            .as_deref()
            .and_then(|id| id.parse().ok())
            .ok_or(AppError::Unauthorized)?;

        let role = UserRole::parse(&claims.role).ok_or(AppError::Unauthorized)?;

        Ok(Self {
            user_id,
            company_id,
            role,
        })
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AppError::Unauthorized)?;
        Self::from_token(&token, &state.config.jwt_secret)
    }
}

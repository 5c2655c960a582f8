//! Authentication routes: login, refresh, logout, profile.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::{AuthContext, SESSION_COOKIE};
use crate::models::user::UserResponse;
use crate::services::auth as auth_service;
use crate::services::auth::TokenPair;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenPair>>), AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = auth_service::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;

    let jar = jar.add(session_cookie(tokens.access_token.clone()));
    Ok((jar, ApiResponse::success(tokens, "Logged in successfully")))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenPair>>), AppError> {
    let tokens = auth_service::refresh_token(
        &state.db,
        &body.refresh_token,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;

    let jar = jar.add(session_cookie(tokens.access_token.clone()));
    Ok((jar, ApiResponse::success(tokens, "Token refreshed")))
}

/// POST /api/auth/logout: drops the session cookie; bearer tokens are discarded client-side.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<Option<()>>>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, ApiResponse::success(None, "Logged out successfully"))
}

/// GET /api/auth/me: current user profile
pub async fn me(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth_service::find_user(&state.db, ctx.user_id, ctx.company_id).await?;
    Ok(ApiResponse::success(UserResponse::from(user), "Profile fetched"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_validation() {
        let ok = LoginRequest {
            email: "owner@acme.test".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}

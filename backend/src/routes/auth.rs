//! Authentication routes
//!
//! Provides endpoints for user registration, login, logout, and the
//! authenticated identity endpoint.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use taskboard_shared::types::{LoginRequest, RegisterRequest, TokenResponse, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /api/auth/register
///
/// Password hashing is offloaded to the blocking thread pool.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let token = UserService::register(
        state.db(),
        state.tokens(),
        &req.username,
        &req.email,
        &req.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = UserService::login(state.db(), state.tokens(), &req.email, &req.password).await?;
    Ok(Json(token))
}

/// Logout
///
/// POST /api/auth/logout
///
/// Tokens are stateless and carry their own expiry; there is no
/// server-side session or revocation list to clear, so this endpoint
/// only acknowledges the request.
async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}

/// Get the authenticated user's identity
///
/// GET /api/auth/me
///
/// Requires a valid Bearer token in the Authorization header.
async fn me(current_user: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile {
        id: current_user.user.id,
        username: current_user.user.username,
        email: current_user.user.email,
    })
}

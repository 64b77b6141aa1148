use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::service::{AuthResponse, AuthServiceError, LoginRequest, RegisterRequest};
use crate::gateway::error::ApiError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, ApiResult, created, ok};
use crate::validation::validate;

/// Register a new user
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(req) = body?;
    validate(&req)?;

    match state.auth.register(req).await {
        Ok(resp) => created(resp),
        Err(AuthServiceError::EmailTaken) => {
            tracing::warn!("Registration attempt for existing email");
            Err(ApiError::Conflict)
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            Err(ApiError::Internal)
        }
    }
}

/// Login user
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(req) = body?;
    validate(&req)?;

    match state.auth.login(req).await {
        Ok(resp) => ok(resp),
        Err(AuthServiceError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            Err(ApiError::InvalidCredentials)
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            Err(ApiError::Internal)
        }
    }
}

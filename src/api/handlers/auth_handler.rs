//! Registration and login handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::RouterExt;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{UserResponse, UserRole};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Created;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    #[schema(example = "sara", min_length = 3)]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    #[schema(example = "sara@aurevia.com")]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    #[schema(example = "SecurePass123!")]
    pub password_confirmation: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "sara")]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route_with_slash("/api/users/register", post(register))
        .route_with_slash("/api/users/login", post(login))
}

/// Register a new account (always role `user`)
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .register(payload.username, payload.email, payload.password, UserRole::User)
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

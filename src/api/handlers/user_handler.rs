//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::RouterExt;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, AdminUser, CurrentUser};
use crate::api::AppState;
use crate::config::is_valid_role;
use crate::domain::{UserChanges, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::NoContent;

/// User update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    #[schema(example = "sara")]
    pub username: Option<String>,
    #[validate(email(message = "invalid email format"))]
    #[schema(example = "sara@aurevia.com")]
    pub email: Option<String>,
    /// New role (admin only)
    #[schema(example = "admin")]
    pub role: Option<String>,
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route_with_slash("/api/users", get(list_users))
        .route_with_slash("/api/users/me", get(get_current_user))
        .route_with_slash(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(caller.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/users/",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 403, description = "Can only view own profile unless admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    if caller.id != id {
        require_admin(&caller)?;
    }

    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update a user (self or admin; role changes need admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not allowed to change this user or role"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if caller.id != id || payload.role.is_some() {
        require_admin(&caller)?;
    }

    let role = match payload.role.as_deref() {
        Some(role) if !is_valid_role(role) => {
            return Err(AppError::validation("role: must be 'user' or 'admin'"));
        }
        Some(role) => Some(UserRole::from(role)),
        None => None,
    };

    let user = state
        .user_service
        .update_user(
            id,
            UserChanges {
                username: payload.username,
                email: payload.email,
                role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user (admin only, not self)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    if admin.id == id {
        return Err(AppError::validation("Cannot delete your own account"));
    }

    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

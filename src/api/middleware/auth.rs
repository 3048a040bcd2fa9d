//! JWT authentication middleware and identity extractors.
//!
//! The middleware runs on every API route. A request without an
//! `Authorization` header passes through anonymous; a header that does not
//! carry a valid bearer token is rejected with 401. The token only names
//! the account: role and username are read from the stored user on every
//! request, and a token for a deleted account is rejected with 401.
//! Handlers then ask for the identity they need through [`CurrentUser`] or
//! [`AdminUser`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{User, UserRole};
use crate::errors::AppError;

/// Authenticated caller, as currently stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Resolve an optional bearer token into a [`CurrentUser`] extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    let user = match state.user_service.get_user(claims.sub).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::debug!(user_id = claims.sub, "Token for a deleted account");
            return Err(AppError::Unauthorized);
        }
        Err(e) => return Err(e),
    };

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::NotAuthenticated)
    }
}

/// Caller that passed the admin check. Rejects before the body is read.
#[derive(Clone, Debug)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require_admin(&user)?;
        Ok(AdminUser(user))
    }
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}

/// Allow the owner of a resource or an admin.
pub fn require_owner_or_admin(user: &CurrentUser, is_owner: bool) -> Result<(), AppError> {
    if is_owner || user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Not authorized to access this resource"))
    }
}

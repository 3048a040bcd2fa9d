//! API middleware.

mod auth;

pub use auth::{auth_middleware, require_admin, require_owner_or_admin, AdminUser, CurrentUser};

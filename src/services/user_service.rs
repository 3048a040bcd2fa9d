//! User service - account lookups and administration.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update username, email or role.
    ///
    /// A new username or email already held by another account is a conflict.
    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let users = self.uow.users();

        if let Some(username) = &changes.username {
            if let Some(holder) = users.find_by_username(username).await? {
                if holder.id != id {
                    return Err(AppError::conflict("Username"));
                }
            }
        }
        if let Some(email) = &changes.email {
            if let Some(holder) = users.find_by_email(email).await? {
                if holder.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        users.update(id, changes).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

//! Seed command - creates the initial admin account.
//!
//! Registration over HTTP always yields plain users, so the first admin
//! has to come from here. Re-running with an existing username is a no-op.

use std::sync::Arc;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection(), config.images_encoding));
    let auth = Authenticator::new(uow, config);

    seed_admin(&auth, args).await
}

async fn seed_admin(auth: &dyn AuthService, args: SeedArgs) -> AppResult<()> {
    match auth
        .register(
            args.admin_username.clone(),
            args.admin_email,
            args.admin_password,
            UserRole::Admin,
        )
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "Admin account created");
            Ok(())
        }
        Err(AppError::Conflict(what)) => {
            tracing::info!(
                username = %args.admin_username,
                "{} already taken, skipping admin seed",
                what
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

//! Migrate command - schema migrations and the images backfill.

use std::sync::Arc;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{ListingManager, ListingService};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations completed successfully");
        }
        MigrateAction::NormalizeImages => {
            tracing::info!(
                encoding = %config.images_encoding,
                "Normalizing stored listing images..."
            );
            let uow = Arc::new(Persistence::new(db.get_connection(), config.images_encoding));
            let rewritten = ListingManager::new(uow).normalize_stored_images().await?;
            tracing::info!(rewritten, "Listing images normalized");
        }
    }

    Ok(())
}

//! Listing repository.
//!
//! Owns the storage encoding of `images`: writes use the configured
//! [`ImageEncoding`], reads normalize whatever shape the row holds.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use super::entities::listing::{self, ActiveModel, Entity as ListingEntity};
use crate::domain::{ImageEncoding, Listing, ListingChanges, NewListing};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// List all listings ordered by ID
    async fn list(&self) -> AppResult<Vec<Listing>>;

    /// Find listing by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Listing>>;

    /// Insert a listing
    async fn create(&self, listing: NewListing) -> AppResult<Listing>;

    /// Apply a partial update
    async fn update(&self, id: i32, changes: ListingChanges) -> AppResult<Listing>;

    /// Delete a listing (its inquiries go with it)
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed listing repository
pub struct ListingStore {
    db: DatabaseConnection,
    encoding: ImageEncoding,
}

impl ListingStore {
    pub fn new(db: DatabaseConnection, encoding: ImageEncoding) -> Self {
        Self { db, encoding }
    }
}

/// Copy the present fields of `changes` onto an active model.
fn apply_changes(
    active: &mut ActiveModel,
    changes: ListingChanges,
    encoding: ImageEncoding,
) -> AppResult<()> {
    if let Some(make) = changes.make {
        active.make = Set(make);
    }
    if let Some(model_year) = changes.model_year {
        active.model_year = Set(model_year);
    }
    if let Some(mileage) = changes.mileage {
        active.mileage = Set(mileage);
    }
    if let Some(spec) = changes.spec {
        active.spec = Set(spec.to_string());
    }
    if let Some(exterior) = changes.exterior {
        active.exterior = Set(exterior);
    }
    if let Some(interior) = changes.interior {
        active.interior = Set(interior);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }
    if let Some(status) = changes.status {
        active.status = Set(status.to_string());
    }
    if let Some(notes) = changes.notes {
        active.notes = Set(notes);
    }
    if let Some(images) = changes.images {
        active.images = Set(Some(encoding.encode_checked(&images)?));
    }
    active.updated_at = Set(chrono::Utc::now());
    Ok(())
}

/// Convert rows for a listing index, skipping rows whose enum columns
/// hold values the API does not know.
fn readable(models: Vec<listing::Model>) -> Vec<Listing> {
    models
        .into_iter()
        .filter_map(|model| {
            let id = model.id;
            Listing::try_from(model)
                .map_err(|e| tracing::warn!(listing_id = id, error = %e, "Skipping unreadable listing"))
                .ok()
        })
        .collect()
}

#[async_trait]
impl ListingRepository for ListingStore {
    async fn list(&self) -> AppResult<Vec<Listing>> {
        let models = ListingEntity::find()
            .order_by_asc(listing::Column::Id)
            .all(&self.db)
            .await?;

        Ok(readable(models))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Listing>> {
        ListingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Listing::try_from)
            .transpose()
    }

    async fn create(&self, listing: NewListing) -> AppResult<Listing> {
        let images = self.encoding.encode_checked(&listing.images)?;
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            make: Set(listing.make),
            model_year: Set(listing.model_year),
            mileage: Set(listing.mileage),
            spec: Set(listing.spec.to_string()),
            exterior: Set(listing.exterior),
            interior: Set(listing.interior),
            price: Set(listing.price),
            status: Set(listing.status.to_string()),
            notes: Set(listing.notes),
            images: Set(Some(images)),
            owner_id: Set(Some(listing.owner_id)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Listing::try_from(model)
    }

    async fn update(&self, id: i32, changes: ListingChanges) -> AppResult<Listing> {
        if let Some(images) = &changes.images {
            self.encoding.accepts(images)?;
        }

        let mut active = ListingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Listing"))?
            .into_active_model();

        apply_changes(&mut active, changes, self.encoding)?;

        let model = active.update(&self.db).await?;
        Listing::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ListingEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Listing"));
        }

        Ok(())
    }
}

//! Listing service - catalog reads and admin maintenance.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Listing, ListingChanges, NewListing};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait ListingService: Send + Sync {
    /// All listings ordered by id
    async fn list_listings(&self) -> AppResult<Vec<Listing>>;

    async fn get_listing(&self, id: i32) -> AppResult<Listing>;

    async fn create_listing(&self, listing: NewListing) -> AppResult<Listing>;

    /// Apply a partial update; an empty change set returns the row as is.
    async fn update_listing(&self, id: i32, changes: ListingChanges) -> AppResult<Listing>;

    async fn delete_listing(&self, id: i32) -> AppResult<()>;

    /// Rewrite every stored `images` value into the configured encoding.
    /// Runs in one transaction and returns the number of rows changed.
    async fn normalize_stored_images(&self) -> AppResult<usize>;
}

pub struct ListingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ListingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ListingService for ListingManager<U> {
    async fn list_listings(&self) -> AppResult<Vec<Listing>> {
        self.uow.listings().list().await
    }

    async fn get_listing(&self, id: i32) -> AppResult<Listing> {
        self.uow
            .listings()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Listing")
    }

    async fn create_listing(&self, listing: NewListing) -> AppResult<Listing> {
        let created = self.uow.listings().create(listing).await?;
        tracing::info!(
            listing_id = created.id,
            images = created.images.len(),
            "Listing created"
        );
        Ok(created)
    }

    async fn update_listing(&self, id: i32, changes: ListingChanges) -> AppResult<Listing> {
        if changes.is_empty() {
            return self.get_listing(id).await;
        }
        self.uow.listings().update(id, changes).await
    }

    async fn delete_listing(&self, id: i32) -> AppResult<()> {
        self.uow.listings().delete(id).await?;
        tracing::info!(listing_id = id, "Listing deleted");
        Ok(())
    }

    async fn normalize_stored_images(&self) -> AppResult<usize> {
        with_transaction!(self.uow, |ctx| ctx.listings().normalize_images().await)
    }
}

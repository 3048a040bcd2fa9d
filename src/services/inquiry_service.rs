//! Inquiry service - messages from visitors about listings.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Inquiry, InquiryChanges, NewInquiry};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait InquiryService: Send + Sync {
    /// Record an inquiry. The listing must exist.
    async fn create_inquiry(&self, inquiry: NewInquiry) -> AppResult<Inquiry>;

    /// Every inquiry, newest first
    async fn list_inquiries(&self) -> AppResult<Vec<Inquiry>>;

    /// Inquiries about one listing, newest first
    async fn list_for_listing(&self, listing_id: i32) -> AppResult<Vec<Inquiry>>;

    async fn get_inquiry(&self, id: i32) -> AppResult<Inquiry>;

    async fn update_inquiry(&self, id: i32, changes: InquiryChanges) -> AppResult<Inquiry>;

    async fn delete_inquiry(&self, id: i32) -> AppResult<()>;
}

pub struct InquiryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> InquiryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> InquiryService for InquiryManager<U> {
    async fn create_inquiry(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        self.uow
            .listings()
            .find_by_id(inquiry.listing_id)
            .await?
            .ok_or_not_found("Listing")?;

        let created = self.uow.inquiries().create(inquiry).await?;
        tracing::info!(
            inquiry_id = created.id,
            listing_id = created.listing_id,
            anonymous = created.user_id.is_none(),
            "Inquiry received"
        );
        Ok(created)
    }

    async fn list_inquiries(&self) -> AppResult<Vec<Inquiry>> {
        self.uow.inquiries().list().await
    }

    async fn list_for_listing(&self, listing_id: i32) -> AppResult<Vec<Inquiry>> {
        self.uow.inquiries().list_for_listing(listing_id).await
    }

    async fn get_inquiry(&self, id: i32) -> AppResult<Inquiry> {
        self.uow
            .inquiries()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Inquiry")
    }

    async fn update_inquiry(&self, id: i32, changes: InquiryChanges) -> AppResult<Inquiry> {
        if changes == InquiryChanges::default() {
            return self.get_inquiry(id).await;
        }
        self.uow.inquiries().update(id, changes).await
    }

    async fn delete_inquiry(&self, id: i32) -> AppResult<()> {
        self.uow.inquiries().delete(id).await
    }
}

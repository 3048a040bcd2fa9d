//! Inquiry repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use super::entities::inquiry::{self, ActiveModel, Entity as InquiryEntity};
use crate::domain::{Inquiry, InquiryChanges, NewInquiry};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// All inquiries, newest first
    async fn list(&self) -> AppResult<Vec<Inquiry>>;

    /// Inquiries about one listing, newest first
    async fn list_for_listing(&self, listing_id: i32) -> AppResult<Vec<Inquiry>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Inquiry>>;

    async fn create(&self, inquiry: NewInquiry) -> AppResult<Inquiry>;

    async fn update(&self, id: i32, changes: InquiryChanges) -> AppResult<Inquiry>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct InquiryStore {
    db: DatabaseConnection,
}

impl InquiryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InquiryRepository for InquiryStore {
    async fn list(&self) -> AppResult<Vec<Inquiry>> {
        let models = InquiryEntity::find()
            .order_by_desc(inquiry::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Inquiry::from).collect())
    }

    async fn list_for_listing(&self, listing_id: i32) -> AppResult<Vec<Inquiry>> {
        let models = InquiryEntity::find()
            .filter(inquiry::Column::ListingId.eq(listing_id))
            .order_by_desc(inquiry::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Inquiry::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Inquiry>> {
        let result = InquiryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Inquiry::from))
    }

    async fn create(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        let active_model = ActiveModel {
            listing_id: Set(inquiry.listing_id),
            full_name: Set(inquiry.full_name),
            phone_number: Set(inquiry.phone_number),
            message: Set(inquiry.message),
            user_id: Set(inquiry.user_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Inquiry::from(model))
    }

    async fn update(&self, id: i32, changes: InquiryChanges) -> AppResult<Inquiry> {
        let mut active = InquiryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Inquiry"))?
            .into_active_model();

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(message) = changes.message {
            active.message = Set(message);
        }

        let model = active.update(&self.db).await?;
        Ok(Inquiry::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = InquiryEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Inquiry"));
        }

        Ok(())
    }
}

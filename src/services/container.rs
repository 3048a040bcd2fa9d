//! Service Container - centralized service access.
//!
//! Wires one shared Unit of Work into every service and hands the
//! services out as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, InquiryManager, InquiryService, ListingManager, ListingService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn listings(&self) -> Arc<dyn ListingService>;

    fn inquiries(&self) -> Arc<dyn InquiryService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    listing_service: Arc<dyn ListingService>,
    inquiry_service: Arc<dyn InquiryService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        listing_service: Arc<dyn ListingService>,
        inquiry_service: Arc<dyn InquiryService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            listing_service,
            inquiry_service,
        }
    }

    /// Build every service over a database connection.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db, config.images_encoding));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            listing_service: Arc::new(ListingManager::new(uow.clone())),
            inquiry_service: Arc::new(InquiryManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn listings(&self) -> Arc<dyn ListingService> {
        self.listing_service.clone()
    }

    fn inquiries(&self) -> Arc<dyn InquiryService> {
        self.inquiry_service.clone()
    }
}

//! Application state - dependency injection container for handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, InquiryService, ListingService, ServiceContainer, Services, UserService,
};

/// Services and infrastructure shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub listing_service: Arc<dyn ListingService>,
    pub inquiry_service: Arc<dyn InquiryService>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the state from a connected database and configuration.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::from_container(&services, database)
    }

    /// Pull every service out of a container.
    pub fn from_container(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            listing_service: services.listings(),
            inquiry_service: services.inquiries(),
            database,
        }
    }

    /// Create state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        listing_service: Arc<dyn ListingService>,
        inquiry_service: Arc<dyn InquiryService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            listing_service,
            inquiry_service,
            database,
        }
    }
}

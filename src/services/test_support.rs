//! Shared fixtures for service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{CarSpec, Inquiry, Listing, ListingStatus, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    InquiryRepository, ListingRepository, MockInquiryRepository, MockListingRepository,
    MockUserRepository, TransactionContext, TransactionFuture, UnitOfWork, UserRepository,
};

/// Unit of Work over mocked repositories. Transactions are unsupported.
pub struct StubUnitOfWork {
    users: Arc<MockUserRepository>,
    listings: Arc<MockListingRepository>,
    inquiries: Arc<MockInquiryRepository>,
}

impl Default for StubUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            listings: Arc::new(MockListingRepository::new()),
            inquiries: Arc::new(MockInquiryRepository::new()),
        }
    }
}

impl StubUnitOfWork {
    pub fn with_users(users: MockUserRepository) -> Self {
        Self {
            users: Arc::new(users),
            ..Default::default()
        }
    }

    pub fn with_listings(listings: MockListingRepository) -> Self {
        Self {
            listings: Arc::new(listings),
            ..Default::default()
        }
    }

    pub fn and_inquiries(mut self, inquiries: MockInquiryRepository) -> Self {
        self.inquiries = Arc::new(inquiries);
        self
    }
}

#[async_trait]
impl UnitOfWork for StubUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn listings(&self) -> Arc<dyn ListingRepository> {
        self.listings.clone()
    }

    fn inquiries(&self) -> Arc<dyn InquiryRepository> {
        self.inquiries.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test stub"))
    }
}

pub fn user_fixture(id: i32, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id,
        username: format!("user{}", id),
        email: format!("user{}@aurevia.com", id),
        password_hash: "hashed".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

pub fn listing_fixture(id: i32, owner_id: i32) -> Listing {
    let now = Utc::now();
    Listing {
        id,
        make: "Porsche 911 Carrera".to_string(),
        model_year: 2021,
        mileage: 12000,
        spec: CarSpec::Gcc,
        exterior: "Guards Red".to_string(),
        interior: "Black leather".to_string(),
        price: 389000.0,
        status: ListingStatus::Available,
        notes: None,
        images: vec!["https://cdn.example.com/911/front.jpg".to_string()],
        owner_id: Some(owner_id),
        created_at: now,
        updated_at: now,
    }
}

pub fn inquiry_fixture(id: i32, listing_id: i32, user_id: Option<i32>) -> Inquiry {
    Inquiry {
        id,
        listing_id,
        full_name: "Sara Ahmed".to_string(),
        phone_number: "+971500000000".to_string(),
        message: "Is the car still available?".to_string(),
        user_id,
        created_at: Utc::now(),
    }
}

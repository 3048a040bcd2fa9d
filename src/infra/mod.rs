//! Infrastructure layer
//!
//! Everything that talks to PostgreSQL lives here:
//! - Connection management and migrations
//! - Repositories (users, listings, inquiries)
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    InquiryRepository, InquiryStore, ListingRepository, ListingStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TransactionFuture, TxListingRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockInquiryRepository, MockListingRepository, MockUserRepository};

//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod inquiry_repository;
mod listing_repository;
mod user_repository;

pub use inquiry_repository::{InquiryRepository, InquiryStore};
pub use listing_repository::{ListingRepository, ListingStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use inquiry_repository::MockInquiryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use listing_repository::MockListingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

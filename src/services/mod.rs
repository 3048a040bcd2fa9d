//! Application services layer - use cases over the domain.
//!
//! Services depend on the `UnitOfWork` abstraction for repository
//! access. Authorization decisions are made by the HTTP handlers
//! before a service is called.

mod auth_service;
pub mod container;
mod inquiry_service;
mod listing_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use inquiry_service::{InquiryManager, InquiryService};
pub use listing_service::{ListingManager, ListingService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

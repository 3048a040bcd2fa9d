//! Domain layer - Core business entities and logic
//!
//! Users, car listings and inquiries, plus the image field normalization
//! shared by every listing read and write. Nothing here touches the
//! database or HTTP.

pub mod images;
pub mod inquiry;
pub mod listing;
pub mod password;
pub mod user;

pub use images::ImageEncoding;
pub use inquiry::{Inquiry, InquiryChanges, NewInquiry};
pub use listing::{CarSpec, Listing, ListingChanges, ListingStatus, NewListing};
pub use password::Password;
pub use user::{User, UserChanges, UserResponse, UserRole};

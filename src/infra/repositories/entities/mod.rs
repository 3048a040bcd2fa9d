//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod inquiry;
pub mod listing;
pub mod user;

#[allow(unused_imports)]
pub use inquiry::{ActiveModel as InquiryActiveModel, Entity as InquiryEntity, Model as InquiryModel};
#[allow(unused_imports)]
pub use listing::{ActiveModel as ListingActiveModel, Entity as ListingEntity, Model as ListingModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};

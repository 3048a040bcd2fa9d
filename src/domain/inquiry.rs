//! Inquiry domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A message about a listing, from a visitor or a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Inquiry {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub listing_id: i32,
    #[schema(example = "Sara Ahmed")]
    pub full_name: String,
    #[schema(example = "+971500000000")]
    pub phone_number: String,
    #[schema(example = "Is the car still available for viewing this weekend?")]
    pub message: String,
    /// Author, absent for anonymous visitors
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    /// True when `user_id` authored this inquiry.
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Data for a new inquiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub listing_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub message: String,
    pub user_id: Option<i32>,
}

/// Partial inquiry update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryChanges {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub message: Option<String>,
}

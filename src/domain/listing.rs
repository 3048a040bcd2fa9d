//! Listing domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Regional specification of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CarSpec {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "GCC")]
    Gcc,
    #[serde(rename = "EU")]
    Eu,
}

impl CarSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarSpec::Us => "US",
            CarSpec::Gcc => "GCC",
            CarSpec::Eu => "EU",
        }
    }
}

impl FromStr for CarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "US" => Ok(CarSpec::Us),
            "GCC" => Ok(CarSpec::Gcc),
            "EU" => Ok(CarSpec::Eu),
            other => Err(format!("spec must be one of US, GCC, EU (got '{}')", other)),
        }
    }
}

impl fmt::Display for CarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sale status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ListingStatus {
    #[default]
    Available,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "Available",
            ListingStatus::Sold => "Sold",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(ListingStatus::Available),
            "Sold" => Ok(ListingStatus::Sold),
            other => Err(format!(
                "status must be one of Available, Sold (got '{}')",
                other
            )),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing domain entity.
///
/// `images` is always the normalized URL list, whatever shape the row
/// was stored in.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Listing {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Porsche 911 Carrera")]
    pub make: String,
    #[schema(example = 2021)]
    pub model_year: i32,
    #[schema(example = 12000)]
    pub mileage: i32,
    pub spec: CarSpec,
    #[schema(example = "Guards Red")]
    pub exterior: String,
    #[schema(example = "Black leather")]
    pub interior: String,
    #[schema(example = 389000.0)]
    pub price: f64,
    pub status: ListingStatus,
    pub notes: Option<String>,
    #[schema(example = json!(["https://cdn.example.com/911/front.jpg"]))]
    pub images: Vec<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Validated data for a new listing
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub make: String,
    pub model_year: i32,
    pub mileage: i32,
    pub spec: CarSpec,
    pub exterior: String,
    pub interior: String,
    pub price: f64,
    pub status: ListingStatus,
    pub notes: Option<String>,
    pub images: Vec<String>,
    pub owner_id: i32,
}

/// Partial listing update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingChanges {
    pub make: Option<String>,
    pub model_year: Option<i32>,
    pub mileage: Option<i32>,
    pub spec: Option<CarSpec>,
    pub exterior: Option<String>,
    pub interior: Option<String>,
    pub price: Option<f64>,
    pub status: Option<ListingStatus>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub images: Option<Vec<String>>,
}

impl ListingChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

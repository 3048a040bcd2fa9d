//! Listing handlers.
//!
//! Reads are public. Every write requires an admin, checked from the token
//! before the body is read or any row is touched.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::RouterExt;
use crate::api::extractors::{FormFields, FromFormFields, JsonOrForm, ValidatedJson};
use crate::api::middleware::AdminUser;
use crate::api::AppState;
use crate::domain::{images, CarSpec, Listing, ListingChanges, ListingStatus, NewListing};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// New listing, from JSON or a form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Porsche 911 Carrera")]
    pub make: String,
    #[validate(range(min = 1886, max = 2100, message = "must be between 1886 and 2100"))]
    #[schema(example = 2021)]
    pub model_year: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 12000)]
    pub mileage: i32,
    pub spec: CarSpec,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Guards Red")]
    pub exterior: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Black leather")]
    pub interior: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    #[schema(example = 389000.0)]
    pub price: f64,
    #[serde(default)]
    pub status: ListingStatus,
    pub notes: Option<String>,
    /// URL list, or a JSON-encoded string of one
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["https://cdn.example.com/911/front.jpg"]))]
    pub images: Value,
}

impl FromFormFields for CreateListingRequest {
    fn from_form_fields(mut fields: FormFields) -> AppResult<Self> {
        Ok(Self {
            make: fields.required("make")?,
            model_year: fields.parse_required("model_year")?,
            mileage: fields.parse("mileage")?.unwrap_or_default(),
            spec: fields.parse_required("spec")?,
            exterior: fields.required("exterior")?,
            interior: fields.required("interior")?,
            price: fields.parse_required("price")?,
            status: fields.parse("status")?.unwrap_or_default(),
            notes: fields.take("notes"),
            images: fields.take("images").map(Value::String).unwrap_or(Value::Null),
        })
    }
}

/// Partial listing update; omitted fields are left as they are
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub make: Option<String>,
    #[validate(range(min = 1886, max = 2100, message = "must be between 1886 and 2100"))]
    pub model_year: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub mileage: Option<i32>,
    pub spec: Option<CarSpec>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub exterior: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub interior: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    pub status: Option<ListingStatus>,
    /// Present-but-null clears the notes
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    /// Present-but-null clears the images; absent leaves them alone
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<Value>,
}

/// Mark a field as present, so an explicit `null` differs from an omitted key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateListingRequest {
    fn into_changes(self) -> AppResult<ListingChanges> {
        Ok(ListingChanges {
            make: self.make,
            model_year: self.model_year,
            mileage: self.mileage,
            spec: self.spec,
            exterior: self.exterior,
            interior: self.interior,
            price: self.price,
            status: self.status,
            notes: self.notes,
            images: self
                .images
                .as_ref()
                .map(images::parse_submitted)
                .transpose()?,
        })
    }
}

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route_with_slash("/api/listings", get(list_listings).post(create_listing))
        .route_with_slash(
            "/api/listings/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

/// List all listings
#[utoipa::path(
    get,
    path = "/api/listings/",
    tag = "Listings",
    responses(
        (status = 200, description = "All listings with normalized images", body = Vec<Listing>)
    )
)]
pub async fn list_listings(State(state): State<AppState>) -> AppResult<Json<Vec<Listing>>> {
    let listings = state.listing_service.list_listings().await?;
    Ok(Json(listings))
}

/// Get one listing
#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    tag = "Listings",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing", body = Listing),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Listing>> {
    let listing = state.listing_service.get_listing(id).await?;
    Ok(Json(listing))
}

/// Create a listing (admin only)
#[utoipa::path(
    post,
    path = "/api/listings/",
    tag = "Listings",
    security(("bearer_auth" = [])),
    request_body(
        content = CreateListingRequest,
        content_type = "application/json",
        description = "Also accepted as multipart/form-data or urlencoded form"
    ),
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Validation error or invalid images"),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonOrForm(payload): JsonOrForm<CreateListingRequest>,
) -> AppResult<Created<Listing>> {
    let images = images::parse_submitted(&payload.images)?;

    let listing = state
        .listing_service
        .create_listing(NewListing {
            make: payload.make,
            model_year: payload.model_year,
            mileage: payload.mileage,
            spec: payload.spec,
            exterior: payload.exterior,
            interior: payload.interior,
            price: payload.price,
            status: payload.status,
            notes: payload.notes,
            images,
            owner_id: admin.id,
        })
        .await?;

    Ok(Created(listing))
}

/// Update a listing (admin only)
#[utoipa::path(
    put,
    path = "/api/listings/{id}",
    tag = "Listings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Listing ID")),
    request_body = UpdateListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = Listing),
        (status = 400, description = "Validation error or invalid images"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn update_listing(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateListingRequest>,
) -> AppResult<Json<Listing>> {
    let changes = payload.into_changes()?;
    tracing::debug!(listing_id = id, admin_id = admin.id, "Updating listing");

    let listing = state.listing_service.update_listing(id, changes).await?;
    Ok(Json(listing))
}

/// Delete a listing and its inquiries (admin only)
#[utoipa::path(
    delete,
    path = "/api/listings/{id}",
    tag = "Listings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.listing_service.delete_listing(id).await?;
    Ok(Json(MessageResponse::new("Listing deleted successfully")))
}

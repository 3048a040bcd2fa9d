//! Inquiry handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::RouterExt;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_owner_or_admin, AdminUser, CurrentUser};
use crate::api::AppState;
use crate::domain::{Inquiry, InquiryChanges, NewInquiry};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Inquiry submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInquiryRequest {
    #[schema(example = 1)]
    pub listing_id: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Sara Ahmed")]
    pub full_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "+971500000000")]
    pub phone_number: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Is the car still available for viewing this weekend?")]
    pub message: String,
}

/// Partial inquiry update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInquiryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: Option<String>,
}

pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route_with_slash("/api/inquiries", get(list_inquiries).post(create_inquiry))
        .route_with_slash("/api/inquiries/listing/:listing_id", get(list_for_listing))
        .route_with_slash(
            "/api/inquiries/:id",
            get(get_inquiry).put(update_inquiry).delete(delete_inquiry),
        )
}

/// Submit an inquiry, signed in or not
#[utoipa::path(
    post,
    path = "/api/inquiries/",
    tag = "Inquiries",
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn create_inquiry(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateInquiryRequest>,
) -> AppResult<Created<Inquiry>> {
    let inquiry = state
        .inquiry_service
        .create_inquiry(NewInquiry {
            listing_id: payload.listing_id,
            full_name: payload.full_name,
            phone_number: payload.phone_number,
            message: payload.message,
            user_id: caller.map(|user| user.id),
        })
        .await?;

    Ok(Created(inquiry))
}

/// List every inquiry (admin only)
#[utoipa::path(
    get,
    path = "/api/inquiries/",
    tag = "Inquiries",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All inquiries, newest first", body = Vec<Inquiry>),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Inquiry>>> {
    let inquiries = state.inquiry_service.list_inquiries().await?;
    Ok(Json(inquiries))
}

/// List inquiries about one listing (listing owner or admin)
#[utoipa::path(
    get,
    path = "/api/inquiries/listing/{listing_id}",
    tag = "Inquiries",
    security(("bearer_auth" = [])),
    params(("listing_id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Inquiries for the listing", body = Vec<Inquiry>),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn list_for_listing(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(listing_id): Path<i32>,
) -> AppResult<Json<Vec<Inquiry>>> {
    let listing = state.listing_service.get_listing(listing_id).await?;
    require_owner_or_admin(&caller, listing.is_owned_by(caller.id))?;

    let inquiries = state.inquiry_service.list_for_listing(listing_id).await?;
    Ok(Json(inquiries))
}

/// Get one inquiry (author or admin)
#[utoipa::path(
    get,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Inquiry", body = Inquiry),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn get_inquiry(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Inquiry>> {
    let inquiry = state.inquiry_service.get_inquiry(id).await?;
    require_owner_or_admin(&caller, inquiry.is_authored_by(caller.id))?;
    Ok(Json(inquiry))
}

/// Edit an inquiry (author or admin)
#[utoipa::path(
    put,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inquiry ID")),
    request_body = UpdateInquiryRequest,
    responses(
        (status = 200, description = "Inquiry updated", body = Inquiry),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn update_inquiry(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateInquiryRequest>,
) -> AppResult<Json<Inquiry>> {
    let existing = state.inquiry_service.get_inquiry(id).await?;
    require_owner_or_admin(&caller, existing.is_authored_by(caller.id))?;

    let inquiry = state
        .inquiry_service
        .update_inquiry(
            id,
            InquiryChanges {
                full_name: payload.full_name,
                phone_number: payload.phone_number,
                message: payload.message,
            },
        )
        .await?;

    Ok(Json(inquiry))
}

/// Delete an inquiry (author or admin)
#[utoipa::path(
    delete,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Inquiry deleted", body = MessageResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let existing = state.inquiry_service.get_inquiry(id).await?;
    require_owner_or_admin(&caller, existing.is_authored_by(caller.id))?;

    state.inquiry_service.delete_inquiry(id).await?;
    Ok(Json(MessageResponse::new("Inquiry deleted successfully")))
}

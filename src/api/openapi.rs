//! OpenAPI documentation configuration, served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, inquiry_handler, listing_handler, user_handler};
use crate::domain::{CarSpec, Inquiry, Listing, ListingStatus, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aurevia Car Auction API",
        version = "0.1.0",
        description = "Car listings, buyer inquiries and user accounts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        listing_handler::list_listings,
        listing_handler::get_listing,
        listing_handler::create_listing,
        listing_handler::update_listing,
        listing_handler::delete_listing,
        inquiry_handler::create_inquiry,
        inquiry_handler::list_inquiries,
        inquiry_handler::list_for_listing,
        inquiry_handler::get_inquiry,
        inquiry_handler::update_inquiry,
        inquiry_handler::delete_inquiry,
        auth_handler::register,
        auth_handler::login,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            Listing,
            CarSpec,
            ListingStatus,
            Inquiry,
            UserRole,
            UserResponse,
            TokenResponse,
            MessageResponse,
            listing_handler::CreateListingRequest,
            listing_handler::UpdateListingRequest,
            inquiry_handler::CreateInquiryRequest,
            inquiry_handler::UpdateInquiryRequest,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Listings", description = "Car listings; writes are admin only"),
        (name = "Inquiries", description = "Buyer inquiries about listings"),
        (name = "Users", description = "Registration, login and account management")
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme referenced by `security(("bearer_auth" = []))`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/users/login"))
                        .build(),
                ),
            );
        }
    }
}

//! Router-level tests for the HTTP API.
//!
//! The real router runs against in-memory service doubles, so routing,
//! extractors, authentication and authorization are exercised without a
//! database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use aurevia_api::api::{create_router, AppState};
use aurevia_api::domain::{
    CarSpec, Inquiry, InquiryChanges, Listing, ListingChanges, ListingStatus, NewInquiry,
    NewListing, User, UserChanges, UserRole,
};
use aurevia_api::errors::{AppError, AppResult};
use aurevia_api::infra::Database;
use aurevia_api::services::{
    AuthService, Claims, InquiryService, ListingService, TokenResponse, UserService,
};

const ADMIN_ID: i32 = 1;
const USER_ID: i32 = 2;
const OTHER_ID: i32 = 3;

// =============================================================================
// In-memory service doubles
// =============================================================================

#[derive(Default)]
struct World {
    users: Vec<User>,
    listings: Vec<Listing>,
    inquiries: Vec<Inquiry>,
}

type Shared = Arc<Mutex<World>>;

fn user(id: i32, username: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id,
        username: username.to_string(),
        email: format!("{}@aurevia.com", username),
        password_hash: "hashed".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

fn seeded_world() -> Shared {
    let now = Utc::now();
    let mut world = World {
        users: vec![
            user(ADMIN_ID, "admin", UserRole::Admin),
            user(USER_ID, "sara", UserRole::User),
            user(OTHER_ID, "omar", UserRole::User),
        ],
        ..Default::default()
    };
    world.listings.push(Listing {
        id: 1,
        make: "Porsche 911 Carrera".to_string(),
        model_year: 2021,
        mileage: 12000,
        spec: CarSpec::Gcc,
        exterior: "Guards Red".to_string(),
        interior: "Black leather".to_string(),
        price: 389000.0,
        status: ListingStatus::Available,
        notes: None,
        images: vec!["https://cdn.example.com/911/front.jpg".to_string()],
        owner_id: Some(ADMIN_ID),
        created_at: now,
        updated_at: now,
    });
    world.inquiries.push(Inquiry {
        id: 1,
        listing_id: 1,
        full_name: "Sara Ahmed".to_string(),
        phone_number: "+971500000000".to_string(),
        message: "Still available?".to_string(),
        user_id: Some(USER_ID),
        created_at: now,
    });
    Arc::new(Mutex::new(world))
}

struct FakeAuth(Shared);

#[async_trait]
impl AuthService for FakeAuth {
    async fn register(
        &self,
        username: String,
        email: String,
        _password: String,
        role: UserRole,
    ) -> AppResult<User> {
        let mut world = self.0.lock().unwrap();
        if world.users.iter().any(|u| u.username == username) {
            return Err(AppError::conflict("Username"));
        }
        let mut created = user(world.users.len() as i32 + 1, &username, role);
        created.email = email;
        world.users.push(created.clone());
        Ok(created)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        if username == "sara" && password == "password123" {
            Ok(TokenResponse {
                access_token: "user-token".to_string(),
                token_type: "bearer".to_string(),
                expires_in: 86400,
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let (sub, username, role) = match token {
            "admin-token" => (ADMIN_ID, "admin", "admin"),
            "user-token" => (USER_ID, "sara", "user"),
            "other-token" => (OTHER_ID, "omar", "user"),
            _ => return Err(AppError::Unauthorized),
        };
        Ok(Claims {
            sub,
            username: username.to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }
}

struct FakeUsers(Shared);

#[async_trait]
impl UserService for FakeUsers {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        let world = self.0.lock().unwrap();
        world
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("User"))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.0.lock().unwrap().users.clone())
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let mut world = self.0.lock().unwrap();
        let found = world
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User"))?;
        if let Some(username) = changes.username {
            found.username = username;
        }
        if let Some(email) = changes.email {
            found.email = email;
        }
        if let Some(role) = changes.role {
            found.role = role;
        }
        Ok(found.clone())
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let mut world = self.0.lock().unwrap();
        let before = world.users.len();
        world.users.retain(|u| u.id != id);
        if world.users.len() == before {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }
}

struct FakeListings(Shared);

#[async_trait]
impl ListingService for FakeListings {
    async fn list_listings(&self) -> AppResult<Vec<Listing>> {
        Ok(self.0.lock().unwrap().listings.clone())
    }

    async fn get_listing(&self, id: i32) -> AppResult<Listing> {
        let world = self.0.lock().unwrap();
        world
            .listings
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Listing"))
    }

    async fn create_listing(&self, new: NewListing) -> AppResult<Listing> {
        let mut world = self.0.lock().unwrap();
        let now = Utc::now();
        let listing = Listing {
            id: world.listings.iter().map(|l| l.id).max().unwrap_or(0) + 1,
            make: new.make,
            model_year: new.model_year,
            mileage: new.mileage,
            spec: new.spec,
            exterior: new.exterior,
            interior: new.interior,
            price: new.price,
            status: new.status,
            notes: new.notes,
            images: new.images,
            owner_id: Some(new.owner_id),
            created_at: now,
            updated_at: now,
        };
        world.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(&self, id: i32, changes: ListingChanges) -> AppResult<Listing> {
        let mut world = self.0.lock().unwrap();
        let found = world
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("Listing"))?;
        if let Some(price) = changes.price {
            found.price = price;
        }
        if let Some(status) = changes.status {
            found.status = status;
        }
        if let Some(notes) = changes.notes {
            found.notes = notes;
        }
        if let Some(images) = changes.images {
            found.images = images;
        }
        Ok(found.clone())
    }

    async fn delete_listing(&self, id: i32) -> AppResult<()> {
        let mut world = self.0.lock().unwrap();
        let before = world.listings.len();
        world.listings.retain(|l| l.id != id);
        if world.listings.len() == before {
            return Err(AppError::not_found("Listing"));
        }
        world.inquiries.retain(|i| i.listing_id != id);
        Ok(())
    }

    async fn normalize_stored_images(&self) -> AppResult<usize> {
        Ok(0)
    }
}

struct FakeInquiries(Shared);

#[async_trait]
impl InquiryService for FakeInquiries {
    async fn create_inquiry(&self, new: NewInquiry) -> AppResult<Inquiry> {
        let mut world = self.0.lock().unwrap();
        if !world.listings.iter().any(|l| l.id == new.listing_id) {
            return Err(AppError::not_found("Listing"));
        }
        let inquiry = Inquiry {
            id: world.inquiries.iter().map(|i| i.id).max().unwrap_or(0) + 1,
            listing_id: new.listing_id,
            full_name: new.full_name,
            phone_number: new.phone_number,
            message: new.message,
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        world.inquiries.push(inquiry.clone());
        Ok(inquiry)
    }

    async fn list_inquiries(&self) -> AppResult<Vec<Inquiry>> {
        Ok(self.0.lock().unwrap().inquiries.clone())
    }

    async fn list_for_listing(&self, listing_id: i32) -> AppResult<Vec<Inquiry>> {
        let world = self.0.lock().unwrap();
        Ok(world
            .inquiries
            .iter()
            .filter(|i| i.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn get_inquiry(&self, id: i32) -> AppResult<Inquiry> {
        let world = self.0.lock().unwrap();
        world
            .inquiries
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Inquiry"))
    }

    async fn update_inquiry(&self, id: i32, changes: InquiryChanges) -> AppResult<Inquiry> {
        let mut world = self.0.lock().unwrap();
        let found = world
            .inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::not_found("Inquiry"))?;
        if let Some(message) = changes.message {
            found.message = message;
        }
        Ok(found.clone())
    }

    async fn delete_inquiry(&self, id: i32) -> AppResult<()> {
        let mut world = self.0.lock().unwrap();
        world.inquiries.retain(|i| i.id != id);
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app(world: &Shared) -> Router {
    let state = AppState::new(
        Arc::new(FakeAuth(world.clone())),
        Arc::new(FakeUsers(world.clone())),
        Arc::new(FakeListings(world.clone())),
        Arc::new(FakeInquiries(world.clone())),
        Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    );
    create_router(state)
}

async fn send(
    world: &Shared,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app(world)
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn listing_body() -> Value {
    json!({
        "make": "Nissan GT-R",
        "model_year": 2019,
        "mileage": 20000,
        "spec": "GCC",
        "exterior": "Pearl White",
        "interior": "Red",
        "price": 250000.0,
        "status": "Available",
        "images": "[\"https://cdn.example.com/gtr/1.jpg\",\"https://cdn.example.com/gtr/2.jpg\"]"
    })
}

fn listing_count(world: &Shared) -> usize {
    world.lock().unwrap().listings.len()
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let world = seeded_world();
    let (status, body) = send(&world, Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Aurevia Car Auction API");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let world = seeded_world();
    let (status, body) = send(&world, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/listings/"].is_object());
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_listing_routes_accept_optional_trailing_slash() {
    let world = seeded_world();

    for uri in ["/api/listings", "/api/listings/", "/api/listings/1", "/api/listings/1/"] {
        let (status, _) = send(&world, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_get_missing_listing_is_404() {
    let world = seeded_world();
    let (status, body) = send(&world, Method::GET, "/api/listings/99", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Listing not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_anonymous_listing_create_is_not_authenticated() {
    let world = seeded_world();
    let (status, body) =
        send(&world, Method::POST, "/api/listings/", None, Some(listing_body())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Not authenticated");
    assert_eq!(listing_count(&world), 1);
}

#[tokio::test]
async fn test_non_admin_listing_writes_are_forbidden_and_mutate_nothing() {
    let world = seeded_world();
    let before = world.lock().unwrap().listings.clone();

    let (status, _) = send(
        &world,
        Method::POST,
        "/api/listings/",
        Some("user-token"),
        Some(listing_body()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/listings/1",
        Some("user-token"),
        Some(json!({"price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&world, Method::DELETE, "/api/listings/1", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(world.lock().unwrap().listings, before);
}

#[tokio::test]
async fn test_non_admin_is_forbidden_even_for_missing_listing() {
    let world = seeded_world();
    let (status, _) = send(&world, Method::DELETE, "/api/listings/99", Some("user-token"), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_token_is_rejected_with_401() {
    let world = seeded_world();
    let (status, body) = send(&world, Method::GET, "/api/listings/", Some("forged"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_creates_listing_from_json_with_string_images() {
    let world = seeded_world();
    let (status, body) = send(
        &world,
        Method::POST,
        "/api/listings/",
        Some("admin-token"),
        Some(listing_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner_id"], ADMIN_ID);
    assert_eq!(body["spec"], "GCC");
    assert_eq!(
        body["images"],
        json!([
            "https://cdn.example.com/gtr/1.jpg",
            "https://cdn.example.com/gtr/2.jpg"
        ])
    );
    assert_eq!(listing_count(&world), 2);
}

#[tokio::test]
async fn test_invalid_images_are_rejected_and_nothing_persisted() {
    let world = seeded_world();
    let mut payload = listing_body();
    payload["images"] = json!("not json at all [");

    let (status, body) =
        send(&world, Method::POST, "/api/listings/", Some("admin-token"), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid images format");
    assert_eq!(listing_count(&world), 1);

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/listings/1",
        Some("admin-token"),
        Some(json!({"images": [42]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        world.lock().unwrap().listings[0].images,
        vec!["https://cdn.example.com/911/front.jpg".to_string()]
    );
}

#[tokio::test]
async fn test_listing_validation_errors_are_400() {
    let world = seeded_world();
    let mut payload = listing_body();
    payload["model_year"] = json!(1700);
    payload["spec"] = json!("JDM");

    let (status, body) =
        send(&world, Method::POST, "/api/listings/", Some("admin-token"), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(listing_count(&world), 1);
}

#[tokio::test]
async fn test_admin_creates_listing_from_urlencoded_form() {
    let world = seeded_world();
    let form = "make=Audi+R8&model_year=2018&spec=EU&exterior=Grey&interior=Black\
                &price=180000&images=%5B%22https%3A%2F%2Fcdn.example.com%2Fr8.jpg%22%5D";

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/listings")
        .header(header::AUTHORIZATION, "Bearer admin-token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let (status, body) = read(app(&world).oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mileage"], 0);
    assert_eq!(body["status"], "Available");
    assert_eq!(body["images"], json!(["https://cdn.example.com/r8.jpg"]));
}

#[tokio::test]
async fn test_admin_creates_listing_from_multipart_form() {
    let world = seeded_world();
    let boundary = "aureviaboundary";
    let fields = [
        ("make", "Ferrari 488"),
        ("model_year", "2017"),
        ("mileage", "15000"),
        ("spec", "US"),
        ("exterior", "Rosso Corsa"),
        ("interior", "Tan"),
        ("price", "299000"),
        ("status", "Sold"),
        ("images", r#"["https://cdn.example.com/488.jpg"]"#),
        ("notes", "One owner"),
    ];
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/listings/")
        .header(header::AUTHORIZATION, "Bearer admin-token")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = read(app(&world).oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Sold");
    assert_eq!(body["notes"], "One owner");
    assert_eq!(body["images"], json!(["https://cdn.example.com/488.jpg"]));
}

#[tokio::test]
async fn test_admin_updates_and_deletes_listing() {
    let world = seeded_world();

    let (status, body) = send(
        &world,
        Method::PUT,
        "/api/listings/1/",
        Some("admin-token"),
        Some(json!({"status": "Sold", "images": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Sold");
    assert_eq!(body["images"], json!([]));

    let (status, body) = send(&world, Method::DELETE, "/api/listings/1", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Listing deleted successfully"}));
    assert_eq!(listing_count(&world), 0);
}

#[tokio::test]
async fn test_explicit_null_clears_listing_notes() {
    let world = seeded_world();
    world.lock().unwrap().listings[0].notes = Some("Full service history".to_string());

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/listings/1",
        Some("admin-token"),
        Some(json!({"price": 380000.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(world.lock().unwrap().listings[0].notes.is_some());

    let (status, body) = send(
        &world,
        Method::PUT,
        "/api/listings/1",
        Some("admin-token"),
        Some(json!({"notes": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], Value::Null);
    assert_eq!(world.lock().unwrap().listings[0].notes, None);
}

// =============================================================================
// Inquiries
// =============================================================================

fn inquiry_body(listing_id: i32) -> Value {
    json!({
        "listing_id": listing_id,
        "full_name": "Visitor",
        "phone_number": "+971555555555",
        "message": "Can I book a test drive?"
    })
}

#[tokio::test]
async fn test_anonymous_inquiry_has_null_user() {
    let world = seeded_world();
    let (status, body) =
        send(&world, Method::POST, "/api/inquiries/", None, Some(inquiry_body(1))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], Value::Null);
    assert_eq!(body["listing_id"], 1);
}

#[tokio::test]
async fn test_signed_in_inquiry_records_author() {
    let world = seeded_world();
    let (status, body) = send(
        &world,
        Method::POST,
        "/api/inquiries",
        Some("other-token"),
        Some(inquiry_body(1)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], OTHER_ID);
}

#[tokio::test]
async fn test_inquiry_for_missing_listing_is_404() {
    let world = seeded_world();
    let (status, body) =
        send(&world, Method::POST, "/api/inquiries/", None, Some(inquiry_body(99))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Listing not found");
}

#[tokio::test]
async fn test_listing_all_inquiries_requires_admin() {
    let world = seeded_world();

    let (status, _) = send(&world, Method::GET, "/api/inquiries/", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&world, Method::GET, "/api/inquiries/", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_inquiries_for_listing_require_owner_or_admin() {
    let world = seeded_world();

    let (status, _) = send(
        &world,
        Method::GET,
        "/api/inquiries/listing/1",
        Some("user-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &world,
        Method::GET,
        "/api/inquiries/listing/1",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 1);

    let (status, _) = send(
        &world,
        Method::GET,
        "/api/inquiries/listing/99",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_author_cannot_touch_inquiry() {
    let world = seeded_world();
    let before = world.lock().unwrap().inquiries.clone();

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/inquiries/1",
        Some("other-token"),
        Some(json!({"message": "hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&world, Method::DELETE, "/api/inquiries/1", Some("other-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&world, Method::DELETE, "/api/inquiries/1", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Not authenticated");

    assert_eq!(world.lock().unwrap().inquiries, before);
}

#[tokio::test]
async fn test_author_and_admin_can_manage_inquiry() {
    let world = seeded_world();

    let (status, body) = send(
        &world,
        Method::PUT,
        "/api/inquiries/1/",
        Some("user-token"),
        Some(json!({"message": "Is the price negotiable?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Is the price negotiable?");

    let (status, body) = send(&world, Method::DELETE, "/api/inquiries/1", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Inquiry deleted successfully"}));
    assert!(world.lock().unwrap().inquiries.is_empty());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_register_returns_created_user_without_hash() {
    let world = seeded_world();
    let (status, body) = send(
        &world,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "username": "layla",
            "email": "layla@aurevia.com",
            "password": "password123",
            "password_confirmation": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "layla");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let world = seeded_world();
    let (status, body) = send(
        &world,
        Method::POST,
        "/api/users/register/",
        None,
        Some(json!({
            "username": "sara",
            "email": "new@aurevia.com",
            "password": "password123",
            "password_confirmation": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Username already exists");
}

#[tokio::test]
async fn test_login_and_me() {
    let world = seeded_world();

    let (status, body) = send(
        &world,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({"username": "sara", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap().to_string();
    let (status, body) = send(&world, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], USER_ID);

    let (status, _) = send(&world, Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wrong_password_is_401() {
    let world = seeded_world();
    let (status, body) = send(
        &world,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({"username": "sara", "password": "wrong-password"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_user_cannot_view_or_promote_others() {
    let world = seeded_world();

    let (status, _) = send(&world, Method::GET, "/api/users/3", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/users/2",
        Some("user-token"),
        Some(json!({"role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(world.lock().unwrap().users[1].role, UserRole::User);

    let (status, body) = send(
        &world,
        Method::PUT,
        "/api/users/2",
        Some("user-token"),
        Some(json!({"email": "sara.new@aurevia.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "sara.new@aurevia.com");
}

#[tokio::test]
async fn test_demoted_admin_loses_rights_with_old_token() {
    let world = seeded_world();

    let (status, _) = send(
        &world,
        Method::PUT,
        "/api/users/1",
        Some("admin-token"),
        Some(json!({"role": "user"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &world,
        Method::POST,
        "/api/listings/",
        Some("admin-token"),
        Some(listing_body()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(listing_count(&world), 1);
}

#[tokio::test]
async fn test_token_of_deleted_account_is_rejected() {
    let world = seeded_world();

    let (status, _) = send(&world, Method::DELETE, "/api/users/3", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&world, Method::GET, "/api/users/me", Some("other-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_deletes_user_but_not_self() {
    let world = seeded_world();

    let (status, _) = send(&world, Method::DELETE, "/api/users/1", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&world, Method::DELETE, "/api/users/3", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(world.lock().unwrap().users.len(), 2);

    let (status, _) = send(&world, Method::DELETE, "/api/users/2", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

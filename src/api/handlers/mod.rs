//! HTTP request handlers.

use axum::{routing::MethodRouter, Router};

use crate::api::AppState;

pub mod auth_handler;
pub mod inquiry_handler;
pub mod listing_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use inquiry_handler::inquiry_routes;
pub use listing_handler::listing_routes;
pub use user_handler::user_routes;

/// Register a route under both `path` and `path/`.
pub(crate) trait RouterExt {
    fn route_with_slash(self, path: &str, method_router: MethodRouter<AppState>) -> Self;
}

impl RouterExt for Router<AppState> {
    fn route_with_slash(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
        self.route(path, method_router.clone())
            .route(&format!("{}/", path), method_router)
    }
}

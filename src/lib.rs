//! Aurevia Car Auction API
//!
//! HTTP JSON API for a car listing marketplace: users register and sign
//! in, admins publish listings, and visitors send inquiries about them.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line entry points
//! - **config**: environment configuration and constants
//! - **domain**: entities, value objects and image normalization
//! - **services**: use cases behind traits
//! - **infra**: database, migrations, repositories, Unit of Work
//! - **api**: handlers, middleware, extractors and routes
//! - **types**: shared response shapes
//! - **errors**: application error type and HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations, then rewrite legacy image values
//! cargo run -- migrate up
//! cargo run -- migrate normalize-images
//!
//! # Create the first admin
//! cargo run -- seed --admin-email admin@aurevia.com --admin-password changeme123
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Inquiry, Listing, Password, User, UserRole};
pub use errors::{AppError, AppResult};

//! Command-line interface.
//!
//! - `serve` - Start the HTTP server
//! - `migrate` - Schema migrations and the images backfill
//! - `seed` - Create the first admin account

pub mod args;

pub use args::{Cli, Commands};

//! CLI command implementations, one module per command.

pub mod migrate;
pub mod seed;
pub mod serve;

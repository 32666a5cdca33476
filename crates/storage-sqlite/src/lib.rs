//! SQLite storage implementation for daybars.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the `BarStore` trait defined in `daybars-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The daily bar repository
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The other crates are database-agnostic and work with traits.

pub mod bars;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use bars::BarRepository;

// Re-export from daybars-core for convenience
pub use daybars_core::errors::{DatabaseError, Error, Result};

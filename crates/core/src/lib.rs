//! Daybars Core - Domain entities, services, and traits.
//!
//! This crate contains the ingestion and query logic for daily stock bars.
//! It is database-agnostic: persistence is reached through the
//! [`bars::BarStore`] trait, implemented by the `storage-sqlite` crate, and
//! the upstream provider is reached through the `BarDataClient` trait from
//! the `market-data` crate.

pub mod bars;
pub mod errors;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

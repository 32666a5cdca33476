//! Polygon market data access for daybars.
//!
//! This crate owns everything that is shaped like the provider rather than
//! like the domain:
//! - [`MarketDataError`]: the provider-facing error taxonomy
//! - [`models`]: transient provider-shaped records and parse outcomes
//! - [`polygon`]: the HTTP client and the aggregates response parser
//!
//! The domain crate (`daybars-core`) consumes this crate through the
//! [`BarDataClient`] trait and the parser function, and maps
//! [`models::ProviderBar`] into its own persisted `DailyBar` type.

pub mod errors;
pub mod models;
pub mod polygon;

pub use errors::MarketDataError;
pub use models::{ParsedBars, ProviderBar, SkipReason, SkippedRecord};
pub use polygon::{parse_aggregates, BarDataClient, PolygonClient, PolygonConfig};

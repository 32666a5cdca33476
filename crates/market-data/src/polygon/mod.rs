//! Polygon.io provider: HTTP client and aggregates response parser.

mod client;
mod parser;

pub use client::{BarDataClient, PolygonClient, PolygonConfig, DEFAULT_AGGS_LIMIT};
pub use parser::parse_aggregates;

//! Daily bar domain: models, ingestion, queries, and the storage seam.

pub mod cache;
pub mod ingest;
pub mod model;
pub mod query;
pub mod store;


pub use cache::{BarCache, CACHE_REGION};
pub use ingest::BarIngestService;
pub use model::{DailyBar, Page, DEFAULT_PAGE_SIZE};
pub use query::BarQueryService;
pub use store::BarStore;

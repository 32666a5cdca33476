use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use daybars_market_data::ProviderBar;

/// Page size used when a caller passes zero or a negative size.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// One stored daily bar for a symbol.
///
/// Prices and volume are optional: the schema tolerates partially populated
/// rows, even though the ingestion path only writes complete records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    /// Storage-assigned surrogate key; `None` until the bar is persisted.
    pub id: Option<i64>,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

impl DailyBar {
    /// Build a domain bar from a provider record, attaching the symbol the
    /// record was fetched for.
    pub fn from_provider(symbol: &str, bar: &ProviderBar) -> Self {
        Self {
            id: None,
            symbol: symbol.to_string(),
            date: bar.date,
            open: Some(bar.open),
            high: Some(bar.high),
            low: Some(bar.low),
            close: Some(bar.close),
            volume: Some(bar.volume),
        }
    }
}

/// One page of query results with zero-based page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of this page.
    pub page: i64,
    pub page_size: i64,
    /// Total matching rows across all pages.
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page, deriving `total_pages` from the total row count.
    pub fn new(items: Vec<T>, page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_items + page_size - 1) / page_size
        } else {
            0
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// A page with no items, used when ingestion finds nothing to store.
    pub fn empty(page: i64, page_size: i64) -> Self {
        Self::new(Vec::new(), page, page_size, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

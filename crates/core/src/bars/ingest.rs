use std::sync::Arc;

use log::{info, warn};

use daybars_market_data::{parse_aggregates, BarDataClient};

use crate::errors::{Result, ValidationError};

use super::model::{DailyBar, Page, DEFAULT_PAGE_SIZE};
use super::store::BarStore;

/// Fetches daily bars from the provider, persists them, and reads the
/// requested page back from storage.
pub struct BarIngestService<C: BarDataClient, S: BarStore> {
    client: Arc<C>,
    store: Arc<S>,
}

impl<C: BarDataClient, S: BarStore> BarIngestService<C, S> {
    pub fn new(client: Arc<C>, store: Arc<S>) -> Self {
        Self { client, store }
    }

    /// Fetch bars for `symbol` over `[from, to]`, store them, and return the
    /// requested page of what is now persisted for that range.
    ///
    /// An empty provider result short-circuits with an empty page and writes
    /// nothing. A `(symbol, date)` conflict fails the whole call with the
    /// database error; no rows from the batch survive.
    pub async fn fetch_and_save(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Page<DailyBar>> {
        if symbol.trim().is_empty() {
            return Err(
                ValidationError::InvalidInput("Stock symbol cannot be empty".to_string()).into(),
            );
        }
        if from.trim().is_empty() {
            return Err(
                ValidationError::InvalidInput("From date cannot be empty".to_string()).into(),
            );
        }
        if to.trim().is_empty() {
            return Err(ValidationError::InvalidInput("To date cannot be empty".to_string()).into());
        }

        // Parsed up front so a malformed date fails before any network call
        // or write; the raw strings still go to the client unchanged.
        let from_date = chrono::NaiveDate::parse_from_str(from, "%Y-%m-%d")?;
        let to_date = chrono::NaiveDate::parse_from_str(to, "%Y-%m-%d")?;

        let page = page.max(0);
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let raw = self.client.fetch_aggregates(symbol, from, to, None).await?;
        let parsed = parse_aggregates(symbol, &raw)?;

        if !parsed.skipped.is_empty() {
            warn!(
                "Skipped {} malformed record(s) for symbol {}",
                parsed.skipped.len(),
                symbol
            );
        }

        if parsed.is_empty() {
            warn!("No bars returned for symbol {} from {} to {}", symbol, from, to);
            return Ok(Page::empty(page, page_size));
        }

        let bars: Vec<DailyBar> = parsed
            .bars
            .iter()
            .map(|bar| DailyBar::from_provider(symbol, bar))
            .collect();

        info!("Saving {} bar(s) for symbol {}", bars.len(), symbol);
        self.store.insert_bars(&bars).await?;

        self.store
            .find_range_paged(symbol, from_date, to_date, page, page_size)
    }
}

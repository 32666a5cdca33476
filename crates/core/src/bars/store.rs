use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;

use super::model::{DailyBar, Page};

/// Persistence seam for daily bars.
///
/// Mutations are async; point and range reads are synchronous because the
/// SQLite implementation serves them directly off the connection pool.
#[async_trait]
pub trait BarStore: Send + Sync {
    /// Insert the given bars in one transaction.
    ///
    /// Fails the whole batch when any row violates the `(symbol, date)`
    /// unique constraint. Returns the number of rows written.
    async fn insert_bars(&self, bars: &[DailyBar]) -> Result<usize>;

    /// Look up a single bar by its natural key.
    fn find_by_symbol_and_date(&self, symbol: &str, date: NaiveDate) -> Result<Option<DailyBar>>;

    /// Fetch one page of bars for a symbol within `[from, to]`, ordered by
    /// date ascending. `page` is zero-based.
    fn find_range_paged(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
        page: i64,
        page_size: i64,
    ) -> Result<Page<DailyBar>>;
}

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::errors::{Error, Result, ValidationError};

use super::cache::BarCache;
use super::model::DailyBar;
use super::store::BarStore;

/// Read-through point lookups over the stored bars.
///
/// Cache-aside: a hit returns without touching storage; a miss queries the
/// store and caches the result. Absent rows are not cached, so a bar
/// ingested later becomes visible on the next lookup.
pub struct BarQueryService<S: BarStore> {
    store: Arc<S>,
    cache: Arc<BarCache>,
}

impl<S: BarStore> BarQueryService<S> {
    pub fn new(store: Arc<S>, cache: Arc<BarCache>) -> Self {
        Self { store, cache }
    }

    /// Look up the bar for `symbol` on `date`.
    ///
    /// Returns [`Error::BarNotFound`] when no row exists; the caller decides
    /// how to surface it.
    pub fn get_bar(&self, symbol: &str, date: NaiveDate) -> Result<DailyBar> {
        if symbol.trim().is_empty() {
            return Err(
                ValidationError::InvalidInput("Stock symbol cannot be empty".to_string()).into(),
            );
        }

        if let Some(bar) = self.cache.get(symbol, date) {
            debug!("Cache hit for {} on {}", symbol, date);
            return Ok(bar);
        }

        match self.store.find_by_symbol_and_date(symbol, date)? {
            Some(bar) => {
                self.cache.insert(bar.clone());
                Ok(bar)
            }
            None => Err(Error::BarNotFound {
                symbol: symbol.to_string(),
                date,
            }),
        }
    }
}

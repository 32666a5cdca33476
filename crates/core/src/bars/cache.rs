//! In-process cache for point lookups.
//!
//! Explicit cache-aside: the query service consults the cache, falls back to
//! the store, and populates the cache itself. Nothing here is transparent or
//! annotation-driven; eviction is manual via [`BarCache::invalidate_symbol`]
//! and [`BarCache::clear`].

use chrono::NaiveDate;
use dashmap::DashMap;

use super::model::DailyBar;

/// Name of the cache region, kept for log lines and diagnostics.
pub const CACHE_REGION: &str = "daily-bars";

/// Concurrent map from `(symbol, date)` to the stored bar.
#[derive(Debug, Default)]
pub struct BarCache {
    entries: DashMap<(String, NaiveDate), DailyBar>,
}

impl BarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str, date: NaiveDate) -> Option<DailyBar> {
        self.entries
            .get(&(symbol.to_string(), date))
            .map(|entry| entry.clone())
    }

    pub fn insert(&self, bar: DailyBar) {
        self.entries.insert((bar.symbol.clone(), bar.date), bar);
    }

    /// Drop every cached entry for one symbol. Callers that re-ingest a
    /// symbol can use this to avoid serving stale bars.
    pub fn invalidate_symbol(&self, symbol: &str) {
        self.entries.retain(|(s, _), _| s != symbol);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

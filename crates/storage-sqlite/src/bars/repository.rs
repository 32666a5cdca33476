use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

use daybars_core::bars::{BarStore, DailyBar, Page};
use daybars_core::Result;

use super::model::{DailyBarDB, NewDailyBarDB, DATE_FORMAT};
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::daily_bars::dsl as daily_bars_dsl;
use crate::utils::chunk_for_sqlite;

pub struct BarRepository {
    pool: Arc<DbPool>,
}

impl BarRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarStore for BarRepository {
    async fn insert_bars(&self, bars: &[DailyBar]) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewDailyBarDB> = bars.iter().map(NewDailyBarDB::from).collect();

        let mut conn = get_connection(&self.pool)?;
        conn.transaction::<usize, StorageError, _>(|conn| {
            let mut total = 0;
            for chunk in chunk_for_sqlite(&rows) {
                total += diesel::insert_into(daily_bars_dsl::daily_bars)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(total)
        })
        .map_err(Into::into)
    }

    fn find_by_symbol_and_date(&self, symbol: &str, date: NaiveDate) -> Result<Option<DailyBar>> {
        let mut conn = get_connection(&self.pool)?;

        let date_str = date.format(DATE_FORMAT).to_string();
        let row = daily_bars_dsl::daily_bars
            .filter(daily_bars_dsl::symbol.eq(symbol))
            .filter(daily_bars_dsl::date.eq(&date_str))
            .first::<DailyBarDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(DailyBar::try_from).transpose()
    }

    fn find_range_paged(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
        page: i64,
        page_size: i64,
    ) -> Result<Page<DailyBar>> {
        let mut conn = get_connection(&self.pool)?;

        let from_str = from.format(DATE_FORMAT).to_string();
        let to_str = to.format(DATE_FORMAT).to_string();

        let total_items: i64 = daily_bars_dsl::daily_bars
            .filter(daily_bars_dsl::symbol.eq(symbol))
            .filter(daily_bars_dsl::date.ge(&from_str))
            .filter(daily_bars_dsl::date.le(&to_str))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        let rows = daily_bars_dsl::daily_bars
            .filter(daily_bars_dsl::symbol.eq(symbol))
            .filter(daily_bars_dsl::date.ge(&from_str))
            .filter(daily_bars_dsl::date.le(&to_str))
            .order(daily_bars_dsl::date.asc())
            .limit(page_size)
            .offset(page.saturating_mul(page_size))
            .load::<DailyBarDB>(&mut conn)
            .into_core()?;

        let items = rows
            .into_iter()
            .map(DailyBar::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(items, page, page_size, total_items))
    }
}

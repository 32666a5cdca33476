use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use daybars_core::bars::{BarStore, DailyBar};
use daybars_core::errors::{DatabaseError, Error};

use super::repository::BarRepository;
use crate::db::{create_pool, init, run_migrations, DbPool};

fn test_pool(dir: &TempDir) -> Arc<DbPool> {
    let data_dir = dir.path().to_string_lossy().to_string();
    let db_path = init(&data_dir).expect("init database");
    let pool = create_pool(&db_path).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    pool
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).expect("valid date")
}

fn bar(symbol: &str, day: u32) -> DailyBar {
    DailyBar {
        id: None,
        symbol: symbol.to_string(),
        date: date(day),
        open: Some(173.97),
        high: Some(174.3),
        low: Some(173.12),
        close: Some(173.57),
        volume: Some(77287356),
    }
}

#[tokio::test]
async fn test_insert_and_point_lookup() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    let written = repo
        .insert_bars(&[bar("AAPL", 15), bar("AAPL", 16)])
        .await
        .expect("insert succeeds");
    assert_eq!(written, 2);

    let found = repo
        .find_by_symbol_and_date("AAPL", date(15))
        .expect("lookup succeeds")
        .expect("row exists");
    assert!(found.id.is_some());
    assert_eq!(found.symbol, "AAPL");
    assert_eq!(found.open, Some(173.97));
    assert_eq!(found.volume, Some(77287356));

    let missing = repo
        .find_by_symbol_and_date("AAPL", date(17))
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_key_fails_the_whole_batch() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    repo.insert_bars(&[bar("AAPL", 15)])
        .await
        .expect("first insert succeeds");

    // Batch contains one fresh row and one conflicting row; the transaction
    // must roll back both.
    let err = repo
        .insert_bars(&[bar("AAPL", 16), bar("AAPL", 15)])
        .await
        .expect_err("conflict must fail");
    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));

    let fresh = repo
        .find_by_symbol_and_date("AAPL", date(16))
        .expect("lookup succeeds");
    assert!(fresh.is_none(), "rolled-back row must not be visible");
}

#[tokio::test]
async fn test_same_date_different_symbols_coexist() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    repo.insert_bars(&[bar("AAPL", 15), bar("MSFT", 15)])
        .await
        .expect("insert succeeds");

    assert!(repo
        .find_by_symbol_and_date("MSFT", date(15))
        .expect("lookup succeeds")
        .is_some());
}

#[tokio::test]
async fn test_null_fields_survive_a_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    let mut partial = bar("AAPL", 15);
    partial.close = None;
    partial.volume = None;
    repo.insert_bars(&[partial]).await.expect("insert succeeds");

    let found = repo
        .find_by_symbol_and_date("AAPL", date(15))
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(found.open, Some(173.97));
    assert_eq!(found.close, None);
    assert_eq!(found.volume, None);
}

#[tokio::test]
async fn test_empty_batch_is_a_no_op() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    let written = repo.insert_bars(&[]).await.expect("empty insert succeeds");
    assert_eq!(written, 0);
}

#[tokio::test]
async fn test_range_query_is_paged_and_ordered() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    // Insert out of order; reads must come back date-ascending.
    repo.insert_bars(&[
        bar("AAPL", 12),
        bar("AAPL", 10),
        bar("AAPL", 11),
        bar("AAPL", 14),
        bar("AAPL", 13),
        bar("MSFT", 11),
    ])
    .await
    .expect("insert succeeds");

    let page = repo
        .find_range_paged("AAPL", date(10), date(14), 0, 2)
        .expect("query succeeds");
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].date, date(10));
    assert_eq!(page.items[1].date, date(11));

    let last = repo
        .find_range_paged("AAPL", date(10), date(14), 2, 2)
        .expect("query succeeds");
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].date, date(14));
}

#[tokio::test]
async fn test_range_query_respects_bounds() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    repo.insert_bars(&[bar("AAPL", 10), bar("AAPL", 15), bar("AAPL", 20)])
        .await
        .expect("insert succeeds");

    let page = repo
        .find_range_paged("AAPL", date(11), date(19), 0, 20)
        .expect("query succeeds");
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].date, date(15));
}

#[tokio::test]
async fn test_huge_page_number_does_not_overflow_the_offset() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    repo.insert_bars(&[bar("AAPL", 10)])
        .await
        .expect("insert succeeds");

    let page = repo
        .find_range_paged("AAPL", date(1), date(31), i64::MAX, 20)
        .expect("query succeeds");
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_with_totals() {
    let dir = TempDir::new().expect("temp dir");
    let repo = BarRepository::new(test_pool(&dir));

    repo.insert_bars(&[bar("AAPL", 10)])
        .await
        .expect("insert succeeds");

    let page = repo
        .find_range_paged("AAPL", date(1), date(31), 5, 20)
        .expect("query succeeds");
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 1);
    assert_eq!(page.total_pages, 1);
}

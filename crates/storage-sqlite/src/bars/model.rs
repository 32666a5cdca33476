//! Database models for daily bars.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use daybars_core::bars::DailyBar;
use daybars_core::errors::{DatabaseError, Error};

/// Storage date format; lexicographic order matches calendar order, so the
/// range filters compare the Text column directly.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for a stored daily bar.
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
)]
#[diesel(table_name = crate::schema::daily_bars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DailyBarDB {
    pub id: i64,
    pub symbol: String,
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

/// Insert model; the `id` column is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::daily_bars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewDailyBarDB {
    pub symbol: String,
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

impl From<&DailyBar> for NewDailyBarDB {
    fn from(bar: &DailyBar) -> Self {
        Self {
            symbol: bar.symbol.clone(),
            date: bar.date.format(DATE_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl TryFrom<DailyBarDB> for DailyBar {
    type Error = Error;

    fn try_from(row: DailyBarDB) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "stored date '{}' is not valid: {}",
                row.date, e
            )))
        })?;

        Ok(Self {
            id: Some(row.id),
            symbol: row.symbol,
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_db_models() {
        let bar = DailyBar {
            id: None,
            symbol: "AAPL".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date"),
            open: Some(173.97),
            high: Some(174.3),
            low: Some(173.12),
            close: Some(173.57),
            volume: Some(77287356),
        };

        let new_row = NewDailyBarDB::from(&bar);
        assert_eq!(new_row.date, "2023-01-15");

        let stored = DailyBarDB {
            id: 7,
            symbol: new_row.symbol,
            date: new_row.date,
            open: new_row.open,
            high: new_row.high,
            low: new_row.low,
            close: new_row.close,
            volume: new_row.volume,
        };
        let restored = DailyBar::try_from(stored).expect("valid row");
        assert_eq!(restored.id, Some(7));
        assert_eq!(restored.date, bar.date);
        assert_eq!(restored.close, Some(173.57));
    }

    #[test]
    fn test_corrupt_stored_date_is_an_internal_error() {
        let stored = DailyBarDB {
            id: 1,
            symbol: "AAPL".to_string(),
            date: "not-a-date".to_string(),
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
        };
        let err = DailyBar::try_from(stored).expect_err("corrupt date must fail");
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));
    }
}

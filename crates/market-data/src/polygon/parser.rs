//! Aggregates response parsing.
//!
//! The parser makes a single pass over the decoded document. Envelope-level
//! problems (embedded `error`, non-OK `status`, undecodable JSON) fail the
//! whole call; anything wrong with an individual record only drops that
//! record. One bad day must never discard the whole range.
//!
//! # Response Format
//!
//! `{ "status": "OK", "results": [ { "t": <epoch-ms or ISO date>, "o": .., "h": .., "l": .., "c": .., "v": .. }, .. ] }`

use chrono::{Local, NaiveDate, TimeZone};
use log::warn;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{ParsedBars, ProviderBar, SkipReason, SkippedRecord};

/// Required per-record numeric fields, checked for presence before any
/// value conversion so the skip reason names the first missing field.
const REQUIRED_FIELDS: [&str; 5] = ["o", "h", "l", "c", "v"];

/// Parse one aggregates response body into normalized daily bars.
///
/// Returns an empty [`ParsedBars`] when the provider reports no data for the
/// range (`results` absent, not an array, or empty); that is a normal
/// outcome, not an error.
pub fn parse_aggregates(symbol: &str, raw: &str) -> Result<ParsedBars, MarketDataError> {
    let root: Value = serde_json::from_str(raw)?;

    if let Some(message) = root.get("error").and_then(Value::as_str) {
        return Err(MarketDataError::UpstreamError {
            message: message.to_string(),
        });
    }

    if let Some(status) = root.get("status").and_then(Value::as_str) {
        if !status.eq_ignore_ascii_case("OK") {
            return Err(MarketDataError::UpstreamStatus {
                status: status.to_string(),
            });
        }
    }

    let results = match root.get("results").and_then(Value::as_array) {
        Some(results) if !results.is_empty() => results,
        _ => {
            warn!("No results in provider response for symbol {}", symbol);
            return Ok(ParsedBars::default());
        }
    };

    let mut parsed = ParsedBars::default();
    for (index, record) in results.iter().enumerate() {
        match map_record(record) {
            Ok(bar) => parsed.bars.push(bar),
            Err(reason) => {
                warn!(
                    "Skipping record {} for symbol {}: {}",
                    index, symbol, reason
                );
                parsed.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    Ok(parsed)
}

fn map_record(record: &Value) -> Result<ProviderBar, SkipReason> {
    let timestamp = record.get("t").ok_or(SkipReason::MissingTimestamp)?;
    let date = normalize_date(timestamp)?;

    for field in REQUIRED_FIELDS {
        if record.get(field).is_none() {
            return Err(SkipReason::MissingField(field));
        }
    }

    Ok(ProviderBar {
        date,
        open: price_field(record, "o")?,
        high: price_field(record, "h")?,
        low: price_field(record, "l")?,
        close: price_field(record, "c")?,
        volume: volume_field(record)?,
    })
}

/// Normalize the `t` field: epoch milliseconds (number or all-digit string)
/// become a calendar date in the local system time zone; anything else is
/// parsed as an ISO `YYYY-MM-DD` date.
fn normalize_date(value: &Value) -> Result<NaiveDate, SkipReason> {
    match value {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| SkipReason::Malformed(format!("non-integer timestamp {}", n)))?;
            epoch_millis_to_local_date(millis)
        }
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            let millis = s
                .parse::<i64>()
                .map_err(|e| SkipReason::Malformed(format!("timestamp '{}': {}", s, e)))?;
            epoch_millis_to_local_date(millis)
        }
        Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| SkipReason::Malformed(format!("date '{}': {}", s, e))),
        other => Err(SkipReason::Malformed(format!(
            "timestamp is neither a number nor a string: {}",
            other
        ))),
    }
}

fn epoch_millis_to_local_date(millis: i64) -> Result<NaiveDate, SkipReason> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
        .ok_or_else(|| SkipReason::Malformed(format!("epoch timestamp {} out of range", millis)))
}

fn price_field(record: &Value, field: &'static str) -> Result<f64, SkipReason> {
    record
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| SkipReason::Malformed(format!("field '{}' is not a number", field)))
}

fn volume_field(record: &Value) -> Result<i64, SkipReason> {
    let value = record
        .get("v")
        .and_then(Value::as_f64)
        .ok_or_else(|| SkipReason::Malformed("field 'v' is not a number".to_string()))?;
    Ok(value as i64)
}

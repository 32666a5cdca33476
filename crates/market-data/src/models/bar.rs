use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fully-populated daily bar as normalized from a provider record.
///
/// The parser only emits records that carried all of open/high/low/close/
/// volume; anything less is skipped and reported via [`SkippedRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderBar {
    /// Trading date the bar aggregates, already normalized from the
    /// provider's epoch-millis or ISO representation.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Why an individual provider record was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record had no `t` field at all.
    MissingTimestamp,
    /// One of the required price/volume fields was absent.
    MissingField(&'static str),
    /// A field was present but could not be interpreted.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTimestamp => write!(f, "missing timestamp field"),
            SkipReason::MissingField(field) => write!(f, "missing required field '{}'", field),
            SkipReason::Malformed(detail) => write!(f, "malformed record: {}", detail),
        }
    }
}

/// One dropped record: its position in the provider's `results` array and
/// the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
}

/// Outcome of parsing one aggregates response.
///
/// Per-record failures never abort the batch; they are accumulated here so
/// callers can observe data quality without exception-driven control flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBars {
    /// Successfully normalized bars, in provider order.
    pub bars: Vec<ProviderBar>,
    /// Records dropped by the per-record tolerance policy.
    pub skipped: Vec<SkippedRecord>,
}

impl ParsedBars {
    /// True when the provider reported no usable data for the range.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{TimelineError, TimelineResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> TimelineResult<f64> {
    value.to_f64().ok_or_else(|| {
        TimelineError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Resolves a slice timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 strings and plain integer epoch milliseconds. Returns
/// `None` for anything else; such timestamps are still compared by equality.
#[must_use]
pub fn timestamp_to_unix_millis(timestamp: &str) -> Option<i64> {
    let trimmed = timestamp.trim();
    if let Ok(millis) = trimmed.parse::<i64>() {
        return Some(millis);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|time| time.with_timezone(&Utc).timestamp_millis())
}

use chrono::{DateTime, Utc};

use crate::error::{ChartError, ChartResult};

/// Linearly maps `value` from `[from_source, to_source]` onto `[from_target, to_target]`.
///
/// No clamping is applied; values outside the source range extrapolate.
#[must_use]
pub fn map_range(
    value: f64,
    from_source: f64,
    to_source: f64,
    from_target: f64,
    to_target: f64,
) -> f64 {
    (value - from_source) / (to_source - from_source) * (to_target - from_target) + from_target
}

/// Converts tracker timestamps (epoch seconds, fractional) to UTC.
pub fn to_date(seconds: f64) -> ChartResult<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {seconds} is out of range"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

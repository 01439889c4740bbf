use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::ConfigError;

/// Grid timestamps `start, start + step, ...` strictly below `end`.
///
/// Empty when `start >= end`. `step` must be positive.
pub fn get_grid_points(start: i64, end: i64, step: i64) -> Vec<i64> {
    if step <= 0 || start >= end {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(((end - start - 1) / step + 1) as usize);
    let mut current = start;
    while current < end {
        points.push(current);
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    points
}

pub fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}

/// Human-readable UTC rendering for logs and reports.
pub fn format_timestamp(timestamp: i64) -> String {
    timestamp_to_datetime(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Parses a window boundary given as `YYYY-MM-DD` (midnight UTC), RFC 3339,
/// or raw unix seconds.
pub fn parse_window_boundary(value: &str) -> Result<i64, ConfigError> {
    let trimmed = value.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        return Ok(seconds);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp())
        .map_err(|source| ConfigError::DateTimeParse {
            value: value.to_string(),
            source,
        })
}

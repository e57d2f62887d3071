//! Time utilities: parsing CLI timestamps and formatting them back.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

fn local_to_utc(naive: NaiveDateTime, raw: &str) -> AppResult<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

/// Parse a timestamp given on the command line.
///
/// Accepted forms:
/// - RFC3339 (`2024-01-01T10:00:00Z`, `2024-01-01T11:00:00+01:00`)
/// - `YYYY-MM-DD HH:MM[:SS]` in local time
/// - `HH:MM[:SS]` today, local time
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let raw = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return local_to_utc(naive, raw);
        }
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(raw, fmt) {
            let today: NaiveDate = Local::now().date_naive();
            return local_to_utc(today.and_time(t), raw);
        }
    }

    Err(AppError::InvalidTime(raw.to_string()))
}

pub fn format_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

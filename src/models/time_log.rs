use super::owner::OwnerKey;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate, // ⇔ time_logs.date (TEXT "YYYY-MM-DD"), bucket key
    pub duration: i64,   // seconds
    #[serde(default)]
    pub description: String,
    pub owner_key: OwnerKey,
}

impl TimeLog {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A validated time log that has not been stored yet.
///
/// `date` and `duration` are derived here once, so every backend stores the
/// same values for the same inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeLog {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate,
    pub duration: i64,
    pub description: String,
}

/// Four-digit years only; stored timestamps must sort as plain text.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

fn check_year(field: &str, ts: &DateTime<Utc>) -> AppResult<()> {
    if YEAR_RANGE.contains(&ts.year()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} is outside the years 0000-9999: {}",
            field,
            ts.to_rfc3339()
        )))
    }
}

impl NewTimeLog {
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        description: Option<&str>,
    ) -> AppResult<Self> {
        check_year("start_time", &start_time)?;
        check_year("end_time", &end_time)?;

        if end_time < start_time {
            return Err(AppError::Validation(format!(
                "end_time ({}) is before start_time ({})",
                end_time.to_rfc3339(),
                start_time.to_rfc3339()
            )));
        }

        Ok(Self {
            start_time,
            end_time,
            date: start_time.date_naive(),
            duration: (end_time - start_time).num_seconds(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
        })
    }

    pub fn into_time_log(self, id: i64, owner_key: OwnerKey) -> TimeLog {
        TimeLog {
            id,
            start_time: self.start_time,
            end_time: self.end_time,
            date: self.date,
            duration: self.duration,
            description: self.description,
            owner_key,
        }
    }
}

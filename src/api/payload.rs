//! Request bodies accepted at the boundary.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

/// Parse a JSON request body; any malformed or missing field is a
/// validation error (400).
pub fn parse_body<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::Validation(format!("Malformed request: {}", e)))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTaskRequest {
    #[serde(alias = "task")]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Both shapes the stopwatch front-ends send.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimeLogRequest {
    /// `{start_time, end_time}` as RFC3339 strings.
    Iso {
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        #[serde(default)]
        description: Option<String>,
    },
    /// `{startTime, endTime, duration}` as milliseconds since the epoch.
    /// The client's `duration` is ignored; it is always derived.
    Epoch {
        #[serde(rename = "startTime")]
        start_time: i64,
        #[serde(rename = "endTime")]
        end_time: i64,
        #[serde(default)]
        #[allow(dead_code)]
        duration: Option<f64>,
        #[serde(default)]
        description: Option<String>,
    },
}

fn from_millis(field: &str, ms: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::Validation(format!("{} out of range: {}", field, ms)))
}

impl TimeLogRequest {
    pub fn span(&self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            TimeLogRequest::Iso {
                start_time,
                end_time,
                ..
            } => Ok((*start_time, *end_time)),
            TimeLogRequest::Epoch {
                start_time,
                end_time,
                ..
            } => Ok((
                from_millis("startTime", *start_time)?,
                from_millis("endTime", *end_time)?,
            )),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TimeLogRequest::Iso { description, .. } | TimeLogRequest::Epoch { description, .. } => {
                description.as_deref()
            }
        }
    }
}

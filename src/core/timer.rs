//! Stopwatch state kept in the caller's token store between invocations.

use crate::errors::{AppError, AppResult};
use crate::identity::TokenStore;
use chrono::{DateTime, Utc};

pub const STOPWATCH_TOKEN: &str = "stopwatch_start";

pub struct Stopwatch<'a> {
    tokens: &'a mut dyn TokenStore,
}

impl<'a> Stopwatch<'a> {
    pub fn new(tokens: &'a mut dyn TokenStore) -> Self {
        Self { tokens }
    }

    /// Start instant of the running session, if any.
    pub fn running_since(&self) -> AppResult<Option<DateTime<Utc>>> {
        match self.tokens.get(STOPWATCH_TOKEN) {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|_| AppError::InvalidTime(raw)),
            None => Ok(None),
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        if let Some(since) = self.running_since()? {
            return Err(AppError::Validation(format!(
                "Stopwatch already running since {}",
                since.to_rfc3339()
            )));
        }
        self.tokens.set(STOPWATCH_TOKEN, &now.to_rfc3339(), None)?;
        Ok(now)
    }

    /// Hand the running span to `record` and clear the start only once it
    /// succeeded; on error the stopwatch keeps running.
    pub fn stop<T>(
        &mut self,
        now: DateTime<Utc>,
        record: impl FnOnce(DateTime<Utc>, DateTime<Utc>) -> AppResult<T>,
    ) -> AppResult<T> {
        let since = self
            .running_since()?
            .ok_or_else(|| AppError::Validation("Stopwatch is not running".into()))?;
        let out = record(since, now)?;
        self.tokens.remove(STOPWATCH_TOKEN)?;
        Ok(out)
    }

    pub fn reset(&mut self) -> AppResult<()> {
        self.tokens.remove(STOPWATCH_TOKEN)
    }
}

use crate::core::audit;
use crate::errors::AppResult;
use crate::identity::RequestContext;
use crate::models::{DailyStat, NewTimeLog, TimeLog, aggregate_daily};
use crate::storage::Storage;
use crate::utils::formatting::secs2readable;
use chrono::{DateTime, Utc};

/// Time-log operations, always scoped to the caller's owner key.
/// Logs are immutable once written.
pub struct TimeLogStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> TimeLogStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        ctx: &RequestContext,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        description: Option<&str>,
    ) -> AppResult<TimeLog> {
        let new_log = NewTimeLog::new(start_time, end_time, description)?;
        let log = self.storage.insert_time_log(ctx.owner(), &new_log)?;
        audit::record(
            self.storage,
            "time_log",
            &log.date_str(),
            &format!("Logged {} (#{})", secs2readable(log.duration), log.id),
        );
        Ok(log)
    }

    pub fn list(&self, ctx: &RequestContext) -> AppResult<Vec<TimeLog>> {
        self.storage.list_time_logs(ctx.owner())
    }

    /// Recomputed from the stored logs on every call.
    pub fn daily_stats(&self, ctx: &RequestContext) -> AppResult<Vec<DailyStat>> {
        Ok(aggregate_daily(&self.list(ctx)?))
    }
}

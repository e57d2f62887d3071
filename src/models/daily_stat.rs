use super::time_log::TimeLog;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-day totals, derived from time logs on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub total_duration: i64,
    pub sessions: i64,
}

/// Group logs by date, sum durations, count sessions; newest date first.
pub fn aggregate_daily(logs: &[TimeLog]) -> Vec<DailyStat> {
    let mut buckets: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();

    for log in logs {
        let entry = buckets.entry(log.date).or_insert((0, 0));
        entry.0 += log.duration;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, (total_duration, sessions))| DailyStat {
            date,
            total_duration,
            sessions,
        })
        .collect()
}

use crate::models::{DailyStat, Task, TimeLog};
use serde::Serialize;

/// Flat rows for CSV / JSON export. Owner keys are never exported.
#[derive(Serialize, Clone, Debug)]
pub struct TimeLogExport {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: i64,
    pub description: String,
}

impl From<&TimeLog> for TimeLogExport {
    fn from(l: &TimeLog) -> Self {
        Self {
            id: l.id,
            date: l.date_str(),
            start_time: l.start_time.to_rfc3339(),
            end_time: l.end_time.to_rfc3339(),
            duration: l.duration,
            description: l.description.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct DailyStatExport {
    pub date: String,
    pub sessions: i64,
    pub total_duration: i64,
}

impl From<&DailyStat> for DailyStatExport {
    fn from(s: &DailyStat) -> Self {
        Self {
            date: s.date.format("%Y-%m-%d").to_string(),
            sessions: s.sessions,
            total_duration: s.total_duration,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TaskExport {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

impl From<&Task> for TaskExport {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id,
            text: t.text.clone(),
            completed: t.completed,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

//! Response bodies. Owner keys never leave the boundary.

use crate::models::{DailyStat, Task, TimeLog};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskView {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            text: t.text,
            completed: t.completed,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeLogView {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate,
    pub duration: i64,
    pub description: String,
}

impl From<TimeLog> for TimeLogView {
    fn from(l: TimeLog) -> Self {
        Self {
            id: l.id,
            start_time: l.start_time,
            end_time: l.end_time,
            date: l.date,
            duration: l.duration,
            description: l.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessBody {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleView {
    pub success: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedTime {
    pub success: bool,
    pub message: String,
    pub log: TimeLogView,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogsView {
    pub logs: Vec<TimeLogView>,
    pub stats: Vec<DailyStat>,
}

/// Everything the landing page shows for one owner.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub tasks: Vec<TaskView>,
    pub logs: Vec<TimeLogView>,
    pub stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInView {
    pub success: bool,
    pub user_id: String,
    /// Rows moved from the anonymous device to the user.
    pub claimed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIView {
    pub owner_key: String,
    pub device_id: Option<String>,
    pub user_id: Option<String>,
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

use serde::{Deserialize, Serialize};

/// One row of the internal audit trail (`log` table in SQLite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub date: String, // RFC3339, local time
    pub operation: String,
    pub target: String,
    pub message: String,
}

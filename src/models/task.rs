use super::owner::OwnerKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub owner_key: OwnerKey, // ⇔ tasks.owner_key
    pub created_at: DateTime<Utc>,
}

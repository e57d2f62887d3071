//! Storage backends behind a single injected interface.
//!
//! Every method is one atomic step against the datastore and every task or
//! time-log method is scoped by the caller's [`OwnerKey`].

pub mod json_file;
pub mod memory;
pub mod sqlite;
pub mod state;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Account, AuditEntry, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Json => "json",
            Backend::Memory => "memory",
        }
    }

    /// Backends that keep their data in a file on disk.
    pub fn is_file_backed(&self) -> bool {
        !matches!(self, Backend::Memory)
    }
}

pub trait Storage: Send + Sync {
    fn backend(&self) -> Backend;

    // ---------------------------
    // Tasks
    // ---------------------------
    fn insert_task(&self, owner: &OwnerKey, text: &str, created_at: DateTime<Utc>)
    -> AppResult<Task>;

    /// Newest-created first.
    fn list_tasks(&self, owner: &OwnerKey) -> AppResult<Vec<Task>>;

    /// Flip `completed` and return the new value. `NotFound` when the task
    /// does not exist under `owner`.
    fn toggle_task(&self, owner: &OwnerKey, id: i64) -> AppResult<bool>;

    fn delete_task(&self, owner: &OwnerKey, id: i64) -> AppResult<()>;

    // ---------------------------
    // Time logs
    // ---------------------------
    fn insert_time_log(&self, owner: &OwnerKey, log: &NewTimeLog) -> AppResult<TimeLog>;

    /// Newest start time first.
    fn list_time_logs(&self, owner: &OwnerKey) -> AppResult<Vec<TimeLog>>;

    /// Move every task and time log from `from` to `to`; returns moved rows.
    fn reassign_owner(&self, from: &OwnerKey, to: &OwnerKey) -> AppResult<usize>;

    // ---------------------------
    // Accounts and sessions
    // ---------------------------
    fn insert_account(&self, account: &Account) -> AppResult<()>;
    fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    fn insert_session(&self, session: &AuthSession) -> AppResult<()>;
    fn find_session(&self, token: &str) -> AppResult<Option<AuthSession>>;
    fn delete_session(&self, token: &str) -> AppResult<bool>;

    // ---------------------------
    // Audit trail
    // ---------------------------
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;
    fn list_audit(&self) -> AppResult<Vec<AuditEntry>>;
}

/// Open the backend selected in the configuration.
pub fn open(cfg: &Config) -> AppResult<Box<dyn Storage>> {
    let storage: Box<dyn Storage> = match cfg.backend {
        Backend::Sqlite => Box::new(SqliteStorage::open(&cfg.database)?),
        Backend::Json => Box::new(JsonFileStorage::open(&cfg.database)?),
        Backend::Memory => Box::new(MemoryStorage::new()),
    };
    Ok(storage)
}

pub(crate) fn task_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Task {} not found", id))
}

pub(crate) fn lock_poisoned() -> AppError {
    AppError::Backend("storage lock poisoned".into())
}

//! Per-process storage: nothing survives the process.
//! One global lock guards the whole state, so interleaved toggle/delete
//! calls never lose updates.

use super::state::StoreState;
use super::{Backend, Storage, lock_poisoned};
use crate::errors::AppResult;
use crate::models::{Account, AuditEntry, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<StoreState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> AppResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| lock_poisoned())
    }
}

impl Storage for MemoryStorage {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn insert_task(
        &self,
        owner: &OwnerKey,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<Task> {
        Ok(self.state()?.insert_task(owner, text, created_at))
    }

    fn list_tasks(&self, owner: &OwnerKey) -> AppResult<Vec<Task>> {
        Ok(self.state()?.list_tasks(owner))
    }

    fn toggle_task(&self, owner: &OwnerKey, id: i64) -> AppResult<bool> {
        self.state()?.toggle_task(owner, id)
    }

    fn delete_task(&self, owner: &OwnerKey, id: i64) -> AppResult<()> {
        self.state()?.delete_task(owner, id)
    }

    fn insert_time_log(&self, owner: &OwnerKey, log: &NewTimeLog) -> AppResult<TimeLog> {
        Ok(self.state()?.insert_time_log(owner, log))
    }

    fn list_time_logs(&self, owner: &OwnerKey) -> AppResult<Vec<TimeLog>> {
        Ok(self.state()?.list_time_logs(owner))
    }

    fn reassign_owner(&self, from: &OwnerKey, to: &OwnerKey) -> AppResult<usize> {
        Ok(self.state()?.reassign_owner(from, to))
    }

    fn insert_account(&self, account: &Account) -> AppResult<()> {
        self.state()?.insert_account(account)
    }

    fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.state()?.find_account_by_email(email))
    }

    fn insert_session(&self, session: &AuthSession) -> AppResult<()> {
        self.state()?.insert_session(session);
        Ok(())
    }

    fn find_session(&self, token: &str) -> AppResult<Option<AuthSession>> {
        Ok(self.state()?.find_session(token))
    }

    fn delete_session(&self, token: &str) -> AppResult<bool> {
        Ok(self.state()?.delete_session(token))
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.state()?.audit(operation, target, message);
        Ok(())
    }

    fn list_audit(&self) -> AppResult<Vec<AuditEntry>> {
        Ok(self.state()?.list_audit())
    }
}

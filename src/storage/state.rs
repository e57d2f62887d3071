//! In-process state shared by the memory and JSON file backends.
//! The JSON backend persists exactly this structure.

use super::task_not_found;
use crate::errors::{AppError, AppResult};
use crate::models::{Account, AuditEntry, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    next_task_id: i64,
    #[serde(default)]
    next_log_id: i64,
    #[serde(default)]
    next_audit_id: i64,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    time_logs: Vec<TimeLog>,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    sessions: Vec<AuthSession>,
    #[serde(default)]
    audit: Vec<AuditEntry>,
}

impl StoreState {
    pub fn insert_task(&mut self, owner: &OwnerKey, text: &str, created_at: DateTime<Utc>) -> Task {
        self.next_task_id += 1;
        let task = Task {
            id: self.next_task_id,
            text: text.to_string(),
            completed: false,
            owner_key: owner.clone(),
            created_at,
        };
        self.tasks.push(task.clone());
        task
    }

    pub fn list_tasks(&self, owner: &OwnerKey) -> Vec<Task> {
        let mut out: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| &t.owner_key == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out
    }

    pub fn toggle_task(&mut self, owner: &OwnerKey, id: i64) -> AppResult<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id && &t.owner_key == owner)
            .ok_or_else(|| task_not_found(id))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn delete_task(&mut self, owner: &OwnerKey, id: i64) -> AppResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !(t.id == id && &t.owner_key == owner));
        if self.tasks.len() == before {
            return Err(task_not_found(id));
        }
        Ok(())
    }

    pub fn insert_time_log(&mut self, owner: &OwnerKey, log: &NewTimeLog) -> TimeLog {
        self.next_log_id += 1;
        let stored = log.clone().into_time_log(self.next_log_id, owner.clone());
        self.time_logs.push(stored.clone());
        stored
    }

    pub fn list_time_logs(&self, owner: &OwnerKey) -> Vec<TimeLog> {
        let mut out: Vec<TimeLog> = self
            .time_logs
            .iter()
            .filter(|l| &l.owner_key == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        out
    }

    pub fn reassign_owner(&mut self, from: &OwnerKey, to: &OwnerKey) -> usize {
        let mut moved = 0;
        for t in self.tasks.iter_mut().filter(|t| &t.owner_key == from) {
            t.owner_key = to.clone();
            moved += 1;
        }
        for l in self.time_logs.iter_mut().filter(|l| &l.owner_key == from) {
            l.owner_key = to.clone();
            moved += 1;
        }
        moved
    }

    pub fn insert_account(&mut self, account: &Account) -> AppResult<()> {
        if self.accounts.iter().any(|a| a.email == account.email) {
            return Err(AppError::Validation(format!(
                "An account for {} already exists",
                account.email
            )));
        }
        self.accounts.push(account.clone());
        Ok(())
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<Account> {
        self.accounts.iter().find(|a| a.email == email).cloned()
    }

    pub fn insert_session(&mut self, session: &AuthSession) {
        self.sessions.push(session.clone());
    }

    pub fn find_session(&self, token: &str) -> Option<AuthSession> {
        self.sessions.iter().find(|s| s.token == token).cloned()
    }

    pub fn delete_session(&mut self, token: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.token != token);
        self.sessions.len() != before
    }

    pub fn audit(&mut self, operation: &str, target: &str, message: &str) {
        self.next_audit_id += 1;
        self.audit.push(AuditEntry {
            id: self.next_audit_id,
            date: Local::now().to_rfc3339(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
    }

    pub fn list_audit(&self) -> Vec<AuditEntry> {
        self.audit.clone()
    }
}

//! Embedded file backend: the whole store lives in one JSON document.
//!
//! Each operation loads the file, applies the change and writes it back
//! (temporary file + rename) while holding one global lock.

use super::state::StoreState;
use super::{Backend, Storage, lock_poisoned};
use crate::errors::AppResult;
use crate::models::{Account, AuditEntry, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct JsonFileStorage {
    path: Mutex<PathBuf>,
}

impl JsonFileStorage {
    /// Open (or create) the store at `path`. A missing file is an empty store.
    pub fn open(path: &str) -> AppResult<Self> {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            save_state(&path, &StoreState::default())?;
        }
        Ok(Self {
            path: Mutex::new(path),
        })
    }

    /// Read-only access to the current state.
    fn read<T>(&self, func: impl FnOnce(&StoreState) -> T) -> AppResult<T> {
        let path = self.path.lock().map_err(|_| lock_poisoned())?;
        let state = load_state(&path)?;
        Ok(func(&state))
    }

    /// Load, mutate and persist. Nothing is written when `func` fails.
    fn write<T>(&self, func: impl FnOnce(&mut StoreState) -> AppResult<T>) -> AppResult<T> {
        let path = self.path.lock().map_err(|_| lock_poisoned())?;
        let mut state = load_state(&path)?;
        let out = func(&mut state)?;
        save_state(&path, &state)?;
        Ok(out)
    }
}

fn load_state(path: &Path) -> AppResult<StoreState> {
    if !path.exists() {
        return Ok(StoreState::default());
    }
    let mut f = OpenOptions::new().read(true).open(path)?;
    let mut s = String::new();
    f.read_to_string(&mut s)?;
    if s.trim().is_empty() {
        return Ok(StoreState::default());
    }
    Ok(serde_json::from_str(&s)?)
}

fn save_state(path: &Path, state: &StoreState) -> AppResult<()> {
    let s = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;
    f.write_all(s.as_bytes())?;
    f.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl Storage for JsonFileStorage {
    fn backend(&self) -> Backend {
        Backend::Json
    }

    fn insert_task(
        &self,
        owner: &OwnerKey,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<Task> {
        self.write(|s| Ok(s.insert_task(owner, text, created_at)))
    }

    fn list_tasks(&self, owner: &OwnerKey) -> AppResult<Vec<Task>> {
        self.read(|s| s.list_tasks(owner))
    }

    fn toggle_task(&self, owner: &OwnerKey, id: i64) -> AppResult<bool> {
        self.write(|s| s.toggle_task(owner, id))
    }

    fn delete_task(&self, owner: &OwnerKey, id: i64) -> AppResult<()> {
        self.write(|s| s.delete_task(owner, id))
    }

    fn insert_time_log(&self, owner: &OwnerKey, log: &NewTimeLog) -> AppResult<TimeLog> {
        self.write(|s| Ok(s.insert_time_log(owner, log)))
    }

    fn list_time_logs(&self, owner: &OwnerKey) -> AppResult<Vec<TimeLog>> {
        self.read(|s| s.list_time_logs(owner))
    }

    fn reassign_owner(&self, from: &OwnerKey, to: &OwnerKey) -> AppResult<usize> {
        self.write(|s| Ok(s.reassign_owner(from, to)))
    }

    fn insert_account(&self, account: &Account) -> AppResult<()> {
        self.write(|s| s.insert_account(account))
    }

    fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.read(|s| s.find_account_by_email(email))
    }

    fn insert_session(&self, session: &AuthSession) -> AppResult<()> {
        self.write(|s| {
            s.insert_session(session);
            Ok(())
        })
    }

    fn find_session(&self, token: &str) -> AppResult<Option<AuthSession>> {
        self.read(|s| s.find_session(token))
    }

    fn delete_session(&self, token: &str) -> AppResult<bool> {
        self.write(|s| Ok(s.delete_session(token)))
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.write(|s| {
            s.audit(operation, target, message);
            Ok(())
        })
    }

    fn list_audit(&self) -> AppResult<Vec<AuditEntry>> {
        self.read(|s| s.list_audit())
    }
}

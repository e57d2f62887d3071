//! Relational backend on SQLite. Every call is a single statement (or one
//! transaction for owner reassignment) against the shared connection.

use super::{Backend, Storage, task_not_found};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::models::{Account, AuditEntry, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, Utc};

pub struct SqliteStorage {
    pool: DbPool,
}

impl SqliteStorage {
    /// Open the database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        pool.with_conn(|conn| Ok(run_pending_migrations(conn)?))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Storage for SqliteStorage {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn insert_task(
        &self,
        owner: &OwnerKey,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<Task> {
        self.pool
            .with_conn(|conn| queries::insert_task(conn, owner, text, &created_at))
    }

    fn list_tasks(&self, owner: &OwnerKey) -> AppResult<Vec<Task>> {
        self.pool.with_conn(|conn| queries::load_tasks(conn, owner))
    }

    fn toggle_task(&self, owner: &OwnerKey, id: i64) -> AppResult<bool> {
        self.pool
            .with_conn(|conn| queries::toggle_task(conn, owner, id))?
            .ok_or_else(|| task_not_found(id))
    }

    fn delete_task(&self, owner: &OwnerKey, id: i64) -> AppResult<()> {
        if self
            .pool
            .with_conn(|conn| queries::delete_task(conn, owner, id))?
        {
            Ok(())
        } else {
            Err(task_not_found(id))
        }
    }

    fn insert_time_log(&self, owner: &OwnerKey, log: &NewTimeLog) -> AppResult<TimeLog> {
        self.pool
            .with_conn(|conn| queries::insert_time_log(conn, owner, log))
    }

    fn list_time_logs(&self, owner: &OwnerKey) -> AppResult<Vec<TimeLog>> {
        self.pool
            .with_conn(|conn| queries::load_time_logs(conn, owner))
    }

    fn reassign_owner(&self, from: &OwnerKey, to: &OwnerKey) -> AppResult<usize> {
        self.pool
            .with_conn(|conn| queries::reassign_owner(conn, from, to))
    }

    fn insert_account(&self, account: &Account) -> AppResult<()> {
        self.pool
            .with_conn(|conn| queries::insert_account(conn, account))
    }

    fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.pool
            .with_conn(|conn| queries::find_account_by_email(conn, email))
    }

    fn insert_session(&self, session: &AuthSession) -> AppResult<()> {
        self.pool
            .with_conn(|conn| queries::insert_session(conn, session))
    }

    fn find_session(&self, token: &str) -> AppResult<Option<AuthSession>> {
        self.pool
            .with_conn(|conn| queries::find_session(conn, token))
    }

    fn delete_session(&self, token: &str) -> AppResult<bool> {
        self.pool
            .with_conn(|conn| queries::delete_session(conn, token))
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.pool
            .with_conn(|conn| log::ttlog(conn, operation, target, message))
    }

    fn list_audit(&self) -> AppResult<Vec<AuditEntry>> {
        self.pool.with_conn(|conn| log::load_log(conn))
    }
}

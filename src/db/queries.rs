use crate::errors::{AppError, AppResult};
use crate::models::{Account, AuthSession, NewTimeLog, OwnerKey, Task, TimeLog};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Timestamps are stored as fixed-width RFC3339 UTC text so that
/// lexical order equals chronological order.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn ts_from_row(row: &Row, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    let idx = row.as_ref().column_index(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(idx, AppError::InvalidTime(raw.clone())))
}

// ---------------------------
// Tasks
// ---------------------------

pub fn map_task_row(row: &Row) -> Result<Task> {
    let owner: String = row.get("owner_key")?;
    Ok(Task {
        id: row.get("id")?,
        text: row.get("text")?,
        completed: row.get::<_, i64>("completed")? == 1,
        owner_key: OwnerKey::from_db_str(&owner),
        created_at: ts_from_row(row, "created_at")?,
    })
}

pub fn insert_task(
    conn: &Connection,
    owner: &OwnerKey,
    text: &str,
    created_at: &DateTime<Utc>,
) -> AppResult<Task> {
    conn.execute(
        "INSERT INTO tasks (text, completed, owner_key, created_at)
         VALUES (?1, 0, ?2, ?3)",
        params![text, owner.as_str(), ts_to_db(created_at)],
    )?;

    Ok(Task {
        id: conn.last_insert_rowid(),
        text: text.to_string(),
        completed: false,
        owner_key: owner.clone(),
        created_at: *created_at,
    })
}

pub fn load_tasks(conn: &Connection, owner: &OwnerKey) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, text, completed, owner_key, created_at FROM tasks
         WHERE owner_key = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([owner.as_str()], map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Flip `completed` in one statement; `None` when no row matched.
pub fn toggle_task(conn: &Connection, owner: &OwnerKey, id: i64) -> AppResult<Option<bool>> {
    let state: Option<i64> = conn
        .query_row(
            "UPDATE tasks
             SET completed = CASE completed WHEN 0 THEN 1 ELSE 0 END
             WHERE id = ?1 AND owner_key = ?2
             RETURNING completed",
            params![id, owner.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(state.map(|c| c == 1))
}

pub fn delete_task(conn: &Connection, owner: &OwnerKey, id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND owner_key = ?2",
        params![id, owner.as_str()],
    )?;
    Ok(n > 0)
}

// ---------------------------
// Time logs
// ---------------------------

pub fn map_time_log_row(row: &Row) -> Result<TimeLog> {
    let date_str: String = row.get("date")?;
    let idx = row.as_ref().column_index("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(date_str.clone())))?;
    let owner: String = row.get("owner_key")?;

    Ok(TimeLog {
        id: row.get("id")?,
        start_time: ts_from_row(row, "start_time")?,
        end_time: ts_from_row(row, "end_time")?,
        date,
        duration: row.get("duration")?,
        description: row.get("description")?,
        owner_key: OwnerKey::from_db_str(&owner),
    })
}

pub fn insert_time_log(conn: &Connection, owner: &OwnerKey, log: &NewTimeLog) -> AppResult<TimeLog> {
    conn.execute(
        "INSERT INTO time_logs (start_time, end_time, date, duration, description, owner_key)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ts_to_db(&log.start_time),
            ts_to_db(&log.end_time),
            log.date.format("%Y-%m-%d").to_string(),
            log.duration,
            log.description,
            owner.as_str(),
        ],
    )?;

    Ok(log.clone().into_time_log(conn.last_insert_rowid(), owner.clone()))
}

pub fn load_time_logs(conn: &Connection, owner: &OwnerKey) -> AppResult<Vec<TimeLog>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start_time, end_time, date, duration, description, owner_key
         FROM time_logs
         WHERE owner_key = ?1
         ORDER BY start_time DESC, id DESC",
    )?;

    let rows = stmt.query_map([owner.as_str()], map_time_log_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Move all rows of `from` to `to` inside one transaction.
pub fn reassign_owner(conn: &mut Connection, from: &OwnerKey, to: &OwnerKey) -> AppResult<usize> {
    let tx = conn.transaction()?;
    let tasks = tx.execute(
        "UPDATE tasks SET owner_key = ?1 WHERE owner_key = ?2",
        params![to.as_str(), from.as_str()],
    )?;
    let logs = tx.execute(
        "UPDATE time_logs SET owner_key = ?1 WHERE owner_key = ?2",
        params![to.as_str(), from.as_str()],
    )?;
    tx.commit()?;
    Ok(tasks + logs)
}

// ---------------------------
// Accounts and sessions
// ---------------------------

fn map_account_row(row: &Row) -> Result<Account> {
    Ok(Account {
        id: row.get("id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        created_at: ts_from_row(row, "created_at")?,
    })
}

pub fn insert_account(conn: &Connection, account: &Account) -> AppResult<()> {
    let res = conn.execute(
        "INSERT INTO accounts (id, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            account.id,
            account.email,
            account.password_hash,
            ts_to_db(&account.created_at),
        ],
    );

    match res {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Validation(format!(
                "An account for {} already exists",
                account.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_account_by_email(conn: &Connection, email: &str) -> AppResult<Option<Account>> {
    let account = conn
        .query_row(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?1",
            [email],
            map_account_row,
        )
        .optional()?;
    Ok(account)
}

pub fn insert_session(conn: &Connection, session: &AuthSession) -> AppResult<()> {
    conn.execute(
        "INSERT INTO auth_sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![session.token, session.user_id, ts_to_db(&session.created_at)],
    )?;
    Ok(())
}

pub fn find_session(conn: &Connection, token: &str) -> AppResult<Option<AuthSession>> {
    let session = conn
        .query_row(
            "SELECT token, user_id, created_at FROM auth_sessions WHERE token = ?1",
            [token],
            |row| {
                Ok(AuthSession {
                    token: row.get("token")?,
                    user_id: row.get("user_id")?,
                    created_at: ts_from_row(row, "created_at")?,
                })
            },
        )
        .optional()?;
    Ok(session)
}

pub fn delete_session(conn: &Connection, token: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM auth_sessions WHERE token = ?1", [token])?;
    Ok(n > 0)
}

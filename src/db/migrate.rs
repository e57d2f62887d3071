use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Create the `tasks` and `time_logs` tables (base schema).
fn create_base_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            text        TEXT NOT NULL CHECK(length(trim(text)) > 0),
            completed   INTEGER NOT NULL DEFAULT 0 CHECK(completed IN (0,1)),
            owner_key   TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            date        TEXT NOT NULL,
            duration    INTEGER NOT NULL CHECK(duration >= 0),
            owner_key   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_owner_created ON tasks(owner_key, created_at);
        CREATE INDEX IF NOT EXISTS idx_time_logs_owner_start ON time_logs(owner_key, start_time);
        CREATE INDEX IF NOT EXISTS idx_time_logs_owner_date ON time_logs(owner_key, date);
        "#,
    )?;
    Ok(())
}

fn migrate_add_time_log_description(conn: &Connection) -> Result<()> {
    let version = "20240301_0002_add_time_log_description";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "time_logs", "description")? {
        conn.execute(
            "ALTER TABLE time_logs ADD COLUMN description TEXT NOT NULL DEFAULT '';",
            [],
        )?;
    }

    mark_applied(conn, version, "added 'description' to time_logs")
}

fn migrate_create_accounts(conn: &Connection) -> Result<()> {
    let version = "20240415_0003_create_accounts";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id             TEXT PRIMARY KEY,
            email          TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS auth_sessions (
            token       TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;

    mark_applied(conn, version, "created accounts and auth_sessions")
}

/// Run all pending migrations. Called every time the SQLite backend is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let fresh = !table_exists(conn, "tasks")? || !table_exists(conn, "time_logs")?;
    create_base_tables(conn)?;
    if fresh {
        success("Created tasks and time_logs tables.");
    }

    // 3) Incremental migrations, in order
    migrate_add_time_log_description(conn)?;
    migrate_create_accounts(conn)?;

    Ok(())
}

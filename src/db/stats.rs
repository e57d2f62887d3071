use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::secs2readable;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let db_path = pool.path();
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    pool.with_conn(|conn| {
        //
        // 2) ROW COUNTS
        //
        let tasks: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        let logs: i64 = conn.query_row("SELECT COUNT(*) FROM time_logs", [], |row| row.get(0))?;
        let owners: i64 = conn.query_row(
            "SELECT COUNT(*) FROM (SELECT owner_key FROM tasks UNION SELECT owner_key FROM time_logs)",
            [],
            |row| row.get(0),
        )?;
        let tracked: i64 = conn.query_row(
            "SELECT IFNULL(SUM(duration), 0) FROM time_logs",
            [],
            |row| row.get(0),
        )?;

        println!("{}• Tasks:{} {}{}{}", CYAN, RESET, GREEN, tasks, RESET);
        println!("{}• Time logs:{} {}{}{}", CYAN, RESET, GREEN, logs, RESET);
        println!("{}• Owners:{} {}", CYAN, RESET, owners);
        println!(
            "{}• Tracked:{} {}",
            CYAN,
            RESET,
            secs2readable(tracked)
        );

        //
        // 3) DATE RANGE
        //
        let first_date: Option<String> = conn
            .query_row(
                "SELECT date FROM time_logs ORDER BY date ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last_date: Option<String> = conn
            .query_row(
                "SELECT date FROM time_logs ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        println!("{}• Date range:{}", CYAN, RESET);
        println!(
            "    from: {}",
            first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
        );
        println!(
            "    to:   {}",
            last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
        );

        println!();
        Ok(())
    })
}

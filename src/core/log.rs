use crate::errors::AppResult;
use crate::models::AuditEntry;
use crate::storage::Storage;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi pattern is valid"));

const OP_WIDTH_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI colour for an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "task_add" | "time_log" => Colour::Green,
        "task_del" => Colour::Red,
        "task_toggle" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "login" | "logout" | "signup" => Colour::Cyan,
        "error" => Colour::RGB(255, 80, 80),
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Render one audit line; `op_w` is the visible width of the op column.
fn render_line(entry: &AuditEntry, id_w: usize, date_w: usize, op_w: usize) -> String {
    let color = color_for_operation(&entry.operation);

    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let truncated = if visible.width() > OP_WIDTH_MAX {
        let mut s = visible.chars().take(OP_WIDTH_MAX - 3).collect::<String>();
        s.push_str("...");
        s
    } else {
        visible
    };

    // only the operation word is coloured
    let colored = match truncated.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(truncated.as_str()).to_string(),
    };

    let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).width()));

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        entry.id,
        entry.date,
        colored,
        padding,
        entry.message,
        id_w = id_w,
        date_w = date_w
    )
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(storage: &dyn Storage) -> AppResult<()> {
        let entries = storage.list_audit()?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.operation.width() + e.target.width() + 3)
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.width()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for entry in &entries {
            println!("{}", render_line(entry, id_w, date_w, op_w));
        }

        Ok(())
    }
}

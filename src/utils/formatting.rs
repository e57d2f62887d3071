//! Formatting utilities used for CLI and export outputs.

/// `5430` → `01h 30m 30s`
pub fn secs2readable(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}h {:02}m {:02}s", sign, s / 3600, (s % 3600) / 60, s % 60)
}

/// `5430` → `01:30:30`
pub fn secs2clock(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

pub fn check_mark(done: bool) -> &'static str {
    if done { "✔" } else { "·" }
}

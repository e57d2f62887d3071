use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM` or `YYYY` and tells whether `date` falls
/// inside that period.
pub fn in_period(date: &NaiveDate, period: &str) -> Option<bool> {
    let p = period.trim();
    if let Some(d) = parse_date(p) {
        return Some(*date == d);
    }
    if let Ok(month) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Some(date.year() == month.year() && date.month() == month.month());
    }
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Some(date.year() == year);
    }
    None
}

/// Reject a period filter that `in_period` cannot interpret.
pub fn check_period(period: &str) -> AppResult<()> {
    match in_period(&NaiveDate::MIN, period) {
        Some(_) => Ok(()),
        None => Err(AppError::InvalidDate(period.to_string())),
    }
}

use chrono::{NaiveDate, TimeZone, Utc};
use rstopwatch::identity::cookie::SetCookie;
use rstopwatch::utils::date::{check_period, in_period};
use rstopwatch::utils::formatting::{secs2clock, secs2readable};
use rstopwatch::utils::table::Table;
use rstopwatch::utils::time::parse_timestamp;

#[test]
fn test_secs_formatting() {
    assert_eq!(secs2readable(90), "00h 01m 30s");
    assert_eq!(secs2readable(5430), "01h 30m 30s");
    assert_eq!(secs2clock(3661), "01:01:01");
}

#[test]
fn test_period_filters() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(in_period(&d, "2024"), Some(true));
    assert_eq!(in_period(&d, "2024-01"), Some(true));
    assert_eq!(in_period(&d, "2024-02"), Some(false));
    assert_eq!(in_period(&d, "2024-01-15"), Some(true));
    assert_eq!(in_period(&d, "last week"), None);

    // Single-digit months and days name the same period.
    assert_eq!(in_period(&d, "2024-1"), Some(true));
    assert_eq!(in_period(&d, "2024-1-15"), Some(true));
    assert_eq!(in_period(&d, "2024-2"), Some(false));

    assert!(check_period("2023-12").is_ok());
    assert_eq!(check_period("Dec").unwrap_err().status_code(), 400);
}

#[test]
fn test_parse_rfc3339_timestamps() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2024-01-01T10:00:00Z").unwrap(), expected);
    assert_eq!(parse_timestamp("2024-01-01T11:00:00+01:00").unwrap(), expected);
    assert!(parse_timestamp("tomorrow-ish").is_err());
}

#[test]
fn test_set_cookie_header() {
    let cookie = SetCookie {
        name: "device_id".into(),
        value: "abc".into(),
        max_age_secs: Some(31_536_000),
    };
    assert_eq!(
        cookie.header_value(),
        "device_id=abc; Max-Age=31536000; Path=/; HttpOnly; SameSite=Lax"
    );
}

#[test]
fn test_table_aligns_columns() {
    let mut table = Table::new(&["ID", "Task"]);
    table.add_row(vec!["1".into(), "short".into()]);
    table.add_row(vec!["12".into(), "a longer one".into()]);

    let out = table.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID Task");
    assert_eq!(lines[1], "-".repeat(2 + 1 + 12));
    assert_eq!(lines[2], "1  short");
    assert_eq!(lines[3], "12 a longer one");
}

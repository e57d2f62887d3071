mod common;
use chrono::{DateTime, NaiveDate, Utc};
use common::{all_backends, device_ctx, setup_test_db, setup_test_json};
use rstopwatch::core::{TaskStore, TimeLogStore};
use rstopwatch::errors::AppError;
use rstopwatch::models::OwnerKey;
use rstopwatch::storage::{JsonFileStorage, SqliteStorage, Storage};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[test]
fn test_create_task_is_listed_open_and_trimmed() {
    for storage in all_backends("store_create") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        let task = tasks.create(&ctx, "  Write report  ").unwrap();
        assert_eq!(task.text, "Write report");
        assert!(!task.completed);

        let listed = tasks.list(&ctx).unwrap();
        assert_eq!(listed.len(), 1, "backend {}", storage.backend().as_str());
        assert_eq!(listed[0].id, task.id);
    }
}

#[test]
fn test_blank_task_text_is_rejected() {
    for storage in all_backends("store_blank") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        for text in ["", "   ", "\t\n"] {
            let err = tasks.create(&ctx, text).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(err.status_code(), 400);
        }
        assert!(tasks.list(&ctx).unwrap().is_empty());
    }
}

#[test]
fn test_tasks_listed_newest_first() {
    for storage in all_backends("store_order") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        let first = tasks.create(&ctx, "first").unwrap();
        let second = tasks.create(&ctx, "second").unwrap();

        let ids: Vec<i64> = tasks.list(&ctx).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}

#[test]
fn test_toggle_twice_restores_state() {
    for storage in all_backends("store_toggle") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");
        let task = tasks.create(&ctx, "flip me").unwrap();

        assert!(tasks.toggle(&ctx, task.id).unwrap());
        assert!(tasks.list(&ctx).unwrap()[0].completed);

        assert!(!tasks.toggle(&ctx, task.id).unwrap());
        assert!(!tasks.list(&ctx).unwrap()[0].completed);
    }
}

#[test]
fn test_toggle_unknown_task_is_not_found() {
    for storage in all_backends("store_toggle_missing") {
        let tasks = TaskStore::new(storage.as_ref());
        let err = tasks.toggle(&device_ctx("alpha"), 4242).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }
}

#[test]
fn test_deleted_task_is_gone() {
    for storage in all_backends("store_delete") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");
        let keep = tasks.create(&ctx, "keep").unwrap();
        let drop = tasks.create(&ctx, "drop").unwrap();

        tasks.delete(&ctx, drop.id).unwrap();

        let listed = tasks.list(&ctx).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);

        let again = tasks.delete(&ctx, drop.id).unwrap_err();
        assert!(matches!(again, AppError::NotFound(_)));
    }
}

#[test]
fn test_owners_are_isolated() {
    for storage in all_backends("store_isolation") {
        let tasks = TaskStore::new(storage.as_ref());
        let logs = TimeLogStore::new(storage.as_ref());
        let a = device_ctx("alpha");
        let b = device_ctx("beta");

        let task = tasks.create(&a, "private").unwrap();
        logs.create(
            &a,
            ts("2024-01-01T10:00:00Z"),
            ts("2024-01-01T11:00:00Z"),
            None,
        )
        .unwrap();

        assert!(tasks.list(&b).unwrap().is_empty());
        assert!(logs.list(&b).unwrap().is_empty());
        assert!(logs.daily_stats(&b).unwrap().is_empty());

        // Another owner cannot touch the task, and it stays unchanged.
        assert!(matches!(
            tasks.toggle(&b, task.id).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            tasks.delete(&b, task.id).unwrap_err(),
            AppError::NotFound(_)
        ));
        let listed = tasks.list(&a).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].completed);
    }
}

#[test]
fn test_time_log_derives_date_and_duration() {
    for storage in all_backends("store_log_90s") {
        let logs = TimeLogStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        let log = logs
            .create(
                &ctx,
                ts("2024-01-01T10:00:00Z"),
                ts("2024-01-01T10:01:30Z"),
                Some("standup"),
            )
            .unwrap();

        assert_eq!(log.duration, 90);
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(log.description, "standup");

        let listed = logs.list(&ctx).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].start_time, ts("2024-01-01T10:00:00Z"));
        assert_eq!(listed[0].end_time, ts("2024-01-01T10:01:30Z"));
    }
}

#[test]
fn test_zero_length_log_is_accepted() {
    for storage in all_backends("store_log_zero") {
        let logs = TimeLogStore::new(storage.as_ref());
        let at = ts("2024-02-10T08:00:00Z");
        let log = logs.create(&device_ctx("alpha"), at, at, None).unwrap();
        assert_eq!(log.duration, 0);
    }
}

#[test]
fn test_reversed_log_is_rejected_and_not_stored() {
    for storage in all_backends("store_log_reversed") {
        let logs = TimeLogStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        let err = logs
            .create(
                &ctx,
                ts("2024-01-01T11:00:00Z"),
                ts("2024-01-01T10:00:00Z"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(logs.list(&ctx).unwrap().is_empty());
    }
}

#[test]
fn test_daily_stats_sum_per_date_newest_first() {
    for storage in all_backends("store_daily") {
        let logs = TimeLogStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");

        for (start, end) in [
            ("2024-01-01T09:00:00Z", "2024-01-01T09:01:00Z"),
            ("2024-01-01T14:00:00Z", "2024-01-01T14:00:30Z"),
            ("2024-01-02T08:00:00Z", "2024-01-02T08:00:10Z"),
        ] {
            logs.create(&ctx, ts(start), ts(end), None).unwrap();
        }

        let stats = logs.daily_stats(&ctx).unwrap();
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(stats[0].total_duration, 10);
        assert_eq!(stats[0].sessions, 1);

        assert_eq!(stats[1].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(stats[1].total_duration, 90);
        assert_eq!(stats[1].sessions, 2);

        // Logs come back newest start first.
        let listed = logs.list(&ctx).unwrap();
        assert_eq!(listed[0].start_time, ts("2024-01-02T08:00:00Z"));
        assert_eq!(listed[2].start_time, ts("2024-01-01T09:00:00Z"));
    }
}

#[test]
fn test_reassign_owner_moves_tasks_and_logs() {
    for storage in all_backends("store_reassign") {
        let device = OwnerKey::device("alpha");
        let user = OwnerKey::user("u-1");

        let tasks = TaskStore::new(storage.as_ref());
        let logs = TimeLogStore::new(storage.as_ref());
        let dev_ctx = device_ctx("alpha");
        tasks.create(&dev_ctx, "carry over").unwrap();
        logs.create(
            &dev_ctx,
            ts("2024-03-01T10:00:00Z"),
            ts("2024-03-01T10:10:00Z"),
            None,
        )
        .unwrap();

        let moved = storage.reassign_owner(&device, &user).unwrap();
        assert_eq!(moved, 2);

        assert!(storage.list_tasks(&device).unwrap().is_empty());
        assert_eq!(storage.list_tasks(&user).unwrap().len(), 1);
        assert_eq!(storage.list_time_logs(&user).unwrap()[0].duration, 600);
    }
}

#[test]
fn test_json_backend_survives_reopen() {
    let path = setup_test_json("store_json_reopen");
    let ctx = device_ctx("alpha");

    {
        let storage = JsonFileStorage::open(&path).unwrap();
        let tasks = TaskStore::new(&storage);
        let task = tasks.create(&ctx, "persisted").unwrap();
        tasks.toggle(&ctx, task.id).unwrap();
    }

    let storage = JsonFileStorage::open(&path).unwrap();
    let tasks = TaskStore::new(&storage);
    let listed = tasks.list(&ctx).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, "persisted");
    assert!(listed[0].completed);

    // Ids keep growing after a reopen.
    let next = tasks.create(&ctx, "next").unwrap();
    assert!(next.id > listed[0].id);
}

#[test]
fn test_sqlite_backend_survives_reopen() {
    let path = setup_test_db("store_sqlite_reopen");
    let ctx = device_ctx("alpha");

    {
        let storage = SqliteStorage::open(&path).unwrap();
        TimeLogStore::new(&storage)
            .create(
                &ctx,
                ts("2024-05-05T22:00:00Z"),
                ts("2024-05-05T23:30:00Z"),
                None,
            )
            .unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    let stats = TimeLogStore::new(&storage).daily_stats(&ctx).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_duration, 5400);
}

#[test]
fn test_operations_are_audited() {
    for storage in all_backends("store_audit") {
        let tasks = TaskStore::new(storage.as_ref());
        let ctx = device_ctx("alpha");
        let task = tasks.create(&ctx, "audited").unwrap();
        tasks.delete(&ctx, task.id).unwrap();

        let ops: Vec<String> = storage
            .list_audit()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert!(ops.iter().any(|o| o == "task_add"));
        assert!(ops.iter().any(|o| o == "task_del"));
    }
}

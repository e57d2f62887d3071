mod common;
use common::{all_backends, device_ctx};
use rstopwatch::api::{Api, CreateTaskRequest, TimeLogRequest, parse_body};
use rstopwatch::config::DEFAULT_COOKIE_MAX_AGE_SECS;
use rstopwatch::identity::{IdentityMode, LocalIdentityProvider};
use rstopwatch::storage::MemoryStorage;
use serde_json::json;

fn with_api(func: impl FnOnce(&Api)) {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    let api = Api::new(
        &storage,
        &provider,
        IdentityMode::Anonymous,
        DEFAULT_COOKIE_MAX_AGE_SECS,
    );
    func(&api);
}

#[test]
fn test_create_task_accepts_text_or_task_field() {
    with_api(|api| {
        let ctx = device_ctx("api");

        let a: CreateTaskRequest = parse_body(r#"{"text": "from text"}"#).unwrap();
        let b: CreateTaskRequest = parse_body(r#"{"task": "from task"}"#).unwrap();
        api.create_task(&ctx, a).unwrap();
        api.create_task(&ctx, b).unwrap();

        let reply = api.reply(api.list_tasks(&ctx));
        assert_eq!(reply.status, 200);
        let body = reply.body.as_array().unwrap().clone();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["text"], "from task");
        assert_eq!(body[1]["text"], "from text");
        // Owner keys stay inside the server.
        assert!(body[0].get("owner_key").is_none());
    });
}

#[test]
fn test_malformed_body_is_400_with_error_field() {
    with_api(|api| {
        let parsed = parse_body::<CreateTaskRequest>(r#"{"title": "wrong field"}"#);
        let reply = api.reply(parsed);
        assert_eq!(reply.status, 400);
        assert!(reply.body["error"].as_str().unwrap().starts_with("Malformed request"));

        let reply = api.reply(parse_body::<TimeLogRequest>("not json"));
        assert_eq!(reply.status, 400);
    });
}

#[test]
fn test_blank_task_is_400() {
    with_api(|api| {
        let req = CreateTaskRequest { text: "   ".into() };
        let reply = api.reply(api.create_task(&device_ctx("api"), req));
        assert_eq!(reply.status, 400);
        assert!(!reply.is_success());
    });
}

#[test]
fn test_toggle_reply_shape_and_unknown_id() {
    with_api(|api| {
        let ctx = device_ctx("api");
        let task = api
            .create_task(&ctx, CreateTaskRequest { text: "t".into() })
            .unwrap();

        let reply = api.reply(api.toggle_task(&ctx, task.id));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, json!({"success": true, "completed": true}));

        let missing = api.reply(api.toggle_task(&ctx, task.id + 100));
        assert_eq!(missing.status, 404);
        assert!(missing.body["error"].is_string());

        let deleted = api.reply(api.delete_task(&ctx, task.id));
        assert_eq!(deleted.body, json!({"success": true}));
    });
}

#[test]
fn test_log_time_iso_shape() {
    with_api(|api| {
        let ctx = device_ctx("api");
        let req: TimeLogRequest = parse_body(
            r#"{"start_time": "2024-01-01T10:00:00Z", "end_time": "2024-01-01T10:01:30Z"}"#,
        )
        .unwrap();

        let reply = api.reply(api.log_time(&ctx, req));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["success"], true);
        assert_eq!(reply.body["log"]["duration"], 90);
        assert_eq!(reply.body["log"]["date"], "2024-01-01");
    });
}

#[test]
fn test_log_time_epoch_shape_ignores_client_duration() {
    with_api(|api| {
        let ctx = device_ctx("api");
        let req: TimeLogRequest = parse_body(
            r#"{"startTime": 1704103200000, "endTime": 1704103290000, "duration": 12345}"#,
        )
        .unwrap();

        let logged = api.log_time(&ctx, req).unwrap();
        assert_eq!(logged.log.duration, 90);

        let view = api.get_logs(&ctx).unwrap();
        assert_eq!(view.logs.len(), 1);
        assert_eq!(view.stats.len(), 1);
        assert_eq!(view.stats[0].total_duration, 90);
    });
}

#[test]
fn test_log_time_reversed_is_400_and_not_stored() {
    with_api(|api| {
        let ctx = device_ctx("api");
        let req: TimeLogRequest = parse_body(
            r#"{"start_time": "2024-01-01T11:00:00Z", "end_time": "2024-01-01T10:00:00Z"}"#,
        )
        .unwrap();

        let reply = api.reply(api.log_time(&ctx, req));
        assert_eq!(reply.status, 400);
        assert!(api.get_logs(&ctx).unwrap().logs.is_empty());
    });
}

#[test]
fn test_dashboard_combines_tasks_logs_and_stats() {
    with_api(|api| {
        let ctx = device_ctx("api");
        api.create_task(&ctx, CreateTaskRequest { text: "plan".into() })
            .unwrap();
        api.log_time(
            &ctx,
            parse_body(r#"{"startTime": 1704103200000, "endTime": 1704106800000}"#).unwrap(),
        )
        .unwrap();

        let body = api.reply(api.dashboard(&ctx)).body;
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(body["logs"].as_array().unwrap().len(), 1);
        assert_eq!(body["stats"][0]["total_duration"], 3600);
        assert_eq!(body["stats"][0]["sessions"], 1);
    });
}

#[test]
fn test_log_time_rejects_years_beyond_four_digits() {
    for storage in all_backends("api_far_future") {
        let provider = LocalIdentityProvider::new(storage.as_ref());
        let api = Api::new(
            storage.as_ref(),
            &provider,
            IdentityMode::Anonymous,
            DEFAULT_COOKIE_MAX_AGE_SECS,
        );
        let ctx = device_ctx("api");

        // 10000-01-01T00:00:00Z and one minute later
        let far: TimeLogRequest =
            parse_body(r#"{"startTime": 253402300800000, "endTime": 253402300860000}"#).unwrap();
        let reply = api.reply(api.log_time(&ctx, far));
        assert_eq!(reply.status, 400, "backend {}", storage.backend().as_str());

        let before_year_zero: TimeLogRequest = parse_body(
            r#"{"startTime": -62198755200000, "endTime": -62198755100000}"#,
        )
        .unwrap();
        assert_eq!(api.reply(api.log_time(&ctx, before_year_zero)).status, 400);

        // The owner's logs stay readable.
        let logs = api.reply(api.get_logs(&ctx));
        assert_eq!(logs.status, 200);
        assert_eq!(logs.body["logs"], json!([]));

        let last_valid: TimeLogRequest = parse_body(
            r#"{"start_time": "9999-12-31T23:00:00Z", "end_time": "9999-12-31T23:30:00Z"}"#,
        )
        .unwrap();
        api.log_time(&ctx, last_valid).unwrap();
        assert_eq!(api.get_logs(&ctx).unwrap().logs.len(), 1);
    }
}

mod common;
use common::{setup_session, temp_out};
use rstopwatch::api::{Api, Credentials};
use rstopwatch::config::{Config, DEFAULT_COOKIE_MAX_AGE_SECS, MAX_COOKIE_MAX_AGE_SECS};
use rstopwatch::core::TaskStore;
use rstopwatch::errors::AppError;
use rstopwatch::identity::{
    CookieJar, DEVICE_COOKIE, FileTokenStore, IdentityMode, IdentityProvider, IdentityResolver,
    LocalIdentityProvider, SESSION_COOKIE, TokenStore,
};
use rstopwatch::models::{OwnerKey, OwnerKind};
use rstopwatch::storage::MemoryStorage;

fn creds(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_cookie_header_parsing() {
    let jar = CookieJar::from_header("device_id=abc-123; theme=dark; broken; session_token=\"tok\"");
    assert_eq!(jar.get(DEVICE_COOKIE).as_deref(), Some("abc-123"));
    assert_eq!(jar.get(SESSION_COOKIE).as_deref(), Some("tok"));
    assert_eq!(jar.get("theme").as_deref(), Some("dark"));
    assert_eq!(jar.get("broken"), None);
}

#[test]
fn test_first_request_mints_device_cookie() {
    let resolver = IdentityResolver::new(IdentityMode::Anonymous, DEFAULT_COOKIE_MAX_AGE_SECS);
    let mut jar = CookieJar::new();

    let ctx = resolver.resolve(&mut jar).unwrap();
    assert!(ctx.new_device);
    assert_eq!(ctx.owner.kind(), Some(OwnerKind::Device));

    let device_id = ctx.device_id.clone().unwrap();
    assert_eq!(device_id.len(), 36);

    let headers = jar.set_cookie_headers();
    assert_eq!(headers.len(), 1);
    assert!(headers[0].starts_with(&format!("device_id={}", device_id)));
    assert!(headers[0].contains("Max-Age=31536000"));
    assert!(headers[0].contains("HttpOnly"));
}

#[test]
fn test_existing_device_cookie_is_reused() {
    let resolver = IdentityResolver::new(IdentityMode::Anonymous, DEFAULT_COOKIE_MAX_AGE_SECS);
    let mut jar = CookieJar::from_header("device_id=known-device");

    let ctx = resolver.resolve(&mut jar).unwrap();
    assert!(!ctx.new_device);
    assert_eq!(ctx.owner, OwnerKey::device("known-device"));
    assert!(jar.outgoing().is_empty());
}

#[test]
fn test_device_and_user_keys_never_collide() {
    assert_ne!(OwnerKey::device("same"), OwnerKey::user("same"));
    assert_eq!(OwnerKey::user("same").id(), "same");
}

#[test]
fn test_authenticated_mode_requires_session() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    let resolver = IdentityResolver::new(IdentityMode::Authenticated, DEFAULT_COOKIE_MAX_AGE_SECS)
        .with_provider(&provider);

    let err = resolver.resolve(&mut CookieJar::new()).unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));
    assert_eq!(err.status_code(), 401);

    let err = resolver
        .resolve(&mut CookieJar::from_header("session_token=forged"))
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn test_authenticated_mode_accepts_valid_session() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    let account = provider.sign_up("ada@example.com", "secret-pw").unwrap();
    let session = provider.sign_in("ada@example.com", "secret-pw").unwrap();

    let resolver = IdentityResolver::new(IdentityMode::Authenticated, DEFAULT_COOKIE_MAX_AGE_SECS)
        .with_provider(&provider);
    let mut jar = CookieJar::from_header(&format!("session_token={}", session.token));

    let ctx = resolver.resolve(&mut jar).unwrap();
    assert_eq!(ctx.owner, OwnerKey::user(&account.id));
    assert!(ctx.is_authenticated());
}

#[test]
fn test_stale_session_falls_back_to_device_when_anonymous() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    let resolver = IdentityResolver::new(IdentityMode::Anonymous, DEFAULT_COOKIE_MAX_AGE_SECS)
        .with_provider(&provider);
    let mut jar = CookieJar::from_header("device_id=dev-1; session_token=expired");

    let ctx = resolver.resolve(&mut jar).unwrap();
    assert_eq!(ctx.owner, OwnerKey::device("dev-1"));
    assert_eq!(jar.get(SESSION_COOKIE), None);
    assert!(jar.set_cookie_headers()[0].starts_with("session_token=; Max-Age=0"));
}

#[test]
fn test_sign_up_validation() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);

    assert_eq!(provider.sign_up("not-an-email", "secret-pw").unwrap_err().status_code(), 400);
    assert_eq!(provider.sign_up("ada@example.com", "123").unwrap_err().status_code(), 400);

    provider.sign_up("Ada@Example.com", "secret-pw").unwrap();
    let dup = provider.sign_up("ada@example.com", "another-pw").unwrap_err();
    assert!(matches!(dup, AppError::Validation(_)));
}

#[test]
fn test_sign_in_rejects_bad_credentials() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    provider.sign_up("ada@example.com", "secret-pw").unwrap();

    let wrong = provider.sign_in("ada@example.com", "wrong-pw").unwrap_err();
    assert_eq!(wrong.status_code(), 401);

    let unknown = provider.sign_in("bob@example.com", "secret-pw").unwrap_err();
    assert_eq!(unknown.status_code(), 401);
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[test]
fn test_sign_in_claims_device_records() {
    let storage = MemoryStorage::new();
    let provider = LocalIdentityProvider::new(&storage);
    let api = Api::new(
        &storage,
        &provider,
        IdentityMode::Anonymous,
        DEFAULT_COOKIE_MAX_AGE_SECS,
    );

    let mut jar = CookieJar::new();
    let anon = api.resolve(&mut jar).unwrap();
    TaskStore::new(&storage).create(&anon, "made anonymously").unwrap();

    api.sign_up(creds("ada@example.com", "secret-pw")).unwrap();
    let view = api
        .sign_in(&mut jar, creds("ada@example.com", "secret-pw"))
        .unwrap();
    assert_eq!(view.claimed, 1);

    let user_ctx = api.resolve(&mut jar).unwrap();
    assert_eq!(user_ctx.owner, OwnerKey::user(&view.user_id));
    let tasks = api.list_tasks(&user_ctx).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "made anonymously");

    // After sign-out the device sees an empty list again.
    api.sign_out(&mut jar).unwrap();
    let back = api.resolve(&mut jar).unwrap();
    assert_eq!(back.owner, OwnerKey::device(anon.device_id.as_deref().unwrap()));
    assert!(api.list_tasks(&back).unwrap().is_empty());
}

#[test]
fn test_file_token_store_persists_and_expires() {
    let path = setup_session("identity_file_store");

    {
        let mut store = FileTokenStore::open(&path).unwrap();
        store.set(DEVICE_COOKIE, "dev-42", Some(3600)).unwrap();
        store.set("gone", "soon", Some(0)).unwrap();
        store.set(SESSION_COOKIE, "tok", None).unwrap();
    }

    let mut store = FileTokenStore::open(&path).unwrap();
    assert_eq!(store.get(DEVICE_COOKIE).as_deref(), Some("dev-42"));
    assert_eq!(store.get(SESSION_COOKIE).as_deref(), Some("tok"));
    assert_eq!(store.get("gone"), None);

    store.remove(SESSION_COOKIE).unwrap();
    let reopened = FileTokenStore::open(&path).unwrap();
    assert_eq!(reopened.get(SESSION_COOKIE), None);
}

#[test]
fn test_config_rejects_oversized_cookie_max_age() {
    let path = temp_out("identity_cfg_max_age", "conf");

    std::fs::write(
        &path,
        "database: /tmp/identity_cfg.sqlite\ncookie_max_age_secs: 9223372036854775\n",
    )
    .unwrap();
    let err = Config::load_from(std::path::Path::new(&path)).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    std::fs::write(
        &path,
        format!(
            "database: /tmp/identity_cfg.sqlite\ncookie_max_age_secs: {}\n",
            MAX_COOKIE_MAX_AGE_SECS
        ),
    )
    .unwrap();
    let cfg = Config::load_from(std::path::Path::new(&path)).unwrap();
    assert_eq!(cfg.cookie_max_age_secs, MAX_COOKIE_MAX_AGE_SECS);
}

#[test]
fn test_file_token_store_out_of_range_max_age_is_an_error() {
    let path = setup_session("identity_huge_max_age");
    let mut store = FileTokenStore::open(&path).unwrap();

    let err = store
        .set(DEVICE_COOKIE, "dev-1", Some(9_223_372_036_854_775))
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert_eq!(store.get(DEVICE_COOKIE), None);

    // The resolver surfaces the same error instead of panicking.
    let resolver = IdentityResolver::new(IdentityMode::Anonymous, i64::MAX);
    let err = resolver.resolve(&mut store).unwrap_err();
    assert_eq!(err.status_code(), 500);
}

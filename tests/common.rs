#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rstopwatch::identity::RequestContext;
use rstopwatch::models::OwnerKey;
use rstopwatch::storage::{JsonFileStorage, MemoryStorage, SqliteStorage, Storage};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsw() -> Command {
    cargo_bin_cmd!("rstopwatch")
}

fn temp_path(file: String) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(file);
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    temp_path(format!("{}_rstopwatch.sqlite", name))
}

pub fn setup_test_json(name: &str) -> String {
    let p = temp_path(format!("{}_rstopwatch.json", name));
    fs::remove_file(format!("{}.tmp", p)).ok();
    p
}

/// Session file standing in for one client's cookie jar
pub fn setup_session(name: &str) -> String {
    temp_path(format!("{}_session.json", name))
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    temp_path(format!("{}_out.{}", name, ext))
}

/// CLI bound to one database and one session file.
pub fn rsw_with(db: &str, session: &str) -> Command {
    let mut cmd = rsw();
    cmd.args(["--db", db, "--session", session, "--backend", "sqlite"]);
    cmd
}

/// Initialize a fresh sqlite DB for the CLI tests
pub fn init_db(name: &str) -> (String, String) {
    let db = setup_test_db(name);
    let session = setup_session(name);
    rsw_with(&db, &session)
        .args(["--test", "init"])
        .assert()
        .success();
    (db, session)
}

/// One instance of every backend, each on fresh storage.
pub fn all_backends(name: &str) -> Vec<Box<dyn Storage>> {
    vec![
        Box::new(MemoryStorage::new()),
        Box::new(SqliteStorage::open(&setup_test_db(name)).expect("open sqlite")),
        Box::new(JsonFileStorage::open(&setup_test_json(name)).expect("open json")),
    ]
}

pub fn device_ctx(id: &str) -> RequestContext {
    RequestContext::for_owner(OwnerKey::device(id))
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

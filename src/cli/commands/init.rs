use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::audit;
use crate::errors::AppResult;
use crate::storage;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the data store for the selected backend, including migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let backend = cli.backend.unwrap_or(cfg.backend);
    let mut init_cfg = Config::init_all(cli.db.clone(), backend, cli.test)?;
    init_cfg.identity = cfg.identity;
    init_cfg.cookie_max_age_secs = cfg.cookie_max_age_secs;

    info("Initializing rStopwatch…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Backend     : {}", backend.as_str()));

    //
    // Opening the store creates the schema / data file
    //
    let store = storage::open(&init_cfg)?;

    if backend.is_file_backed() {
        success(format!("Database initialized at {}", &init_cfg.database));
    } else {
        info("Memory backend: data lives only for the duration of a command.");
    }

    audit::record(
        store.as_ref(),
        "init",
        backend.as_str(),
        &format!("Store initialized at {}", &init_cfg.database),
    );

    success("rStopwatch initialization completed!");
    Ok(())
}

//! rStopwatch library root.
//! Exposes the request boundary, storage backends, CLI parser and run().

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod identity;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use api::ApiReply;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::path::resolve_in;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Task { .. } => cli::commands::task::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(cli, cfg),
        Commands::Timer { .. } => cli::commands::timer::handle(cli, cfg),
        Commands::Signup { .. } | Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::auth::handle(cli, cfg)
        }
        Commands::Audit { .. } => cli::commands::audit::handle(cli, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, mut cfg: Config) -> Config {
    if let Some(backend) = cli.backend {
        if backend != cfg.backend && cli.db.is_none() {
            cfg.database = Config::database_file(backend).to_string_lossy().to_string();
        }
        cfg.backend = backend;
    }

    // Relative names live next to the config file, as `init` creates them.
    if let Some(custom_db) = &cli.db {
        cfg.database = resolve_in(&Config::config_dir(), custom_db)
            .to_string_lossy()
            .to_string();
    }

    if let Some(session) = &cli.session {
        cfg.session_file = session.clone();
    }

    cfg
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    ui::messages::set_quiet(cli.json);

    let result = Config::load().and_then(|cfg| dispatch(&cli, &apply_overrides(&cli, cfg)));

    // In JSON mode failures are reported as `{"error": ...}` on stdout too.
    if cli.json
        && let Err(e) = &result
    {
        let reply = ApiReply::from_error(e);
        println!("{}", reply.body);
    }

    result
}

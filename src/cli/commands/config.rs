use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use std::path::Path;

/// Show the effective configuration (file values plus command-line overrides).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config { print_config, path } = cmd else {
        return Ok(());
    };

    let file = Config::config_file();
    if *path {
        println!("{}", file.display());
        if !*print_config {
            return Ok(());
        }
    }

    if !file.exists() {
        warning("No config file yet, showing defaults (run `rstopwatch init`).");
    }
    println!("{}", cfg.to_yaml()?);

    if cfg.backend.is_file_backed() && !Path::new(&cfg.database).exists() {
        info(format!("Data file {} does not exist yet.", cfg.database));
    }
    Ok(())
}

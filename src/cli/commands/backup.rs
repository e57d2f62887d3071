use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::storage;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = &cli.command
    {
        let store = storage::open(cfg)?;
        BackupLogic::backup(store.as_ref(), cfg, file, *compress, *force)?;
    }

    Ok(())
}

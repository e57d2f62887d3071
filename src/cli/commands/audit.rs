use crate::cli::parser::{Cli, Commands};
use crate::cli::output::emit;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::storage;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if matches!(cli.command, Commands::Audit { print: true }) {
        let store = storage::open(cfg)?;
        if cli.json {
            let entries = store.list_audit()?;
            emit(true, &entries, |_| {})?;
        } else {
            LogLogic::print_log(store.as_ref())?;
        }
    }

    Ok(())
}

use crate::cli::context::with_api;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        what,
        file,
        force,
    } = &cli.command
    {
        with_api(cli, cfg, |api, tokens, _json| {
            let ctx = api.resolve(tokens)?;
            ExportLogic::export(api.storage(), &ctx, *format, *what, file, *force)?;
            Ok(())
        })?;
    }
    Ok(())
}

use crate::api::TimeLogRequest;
use crate::cli::context::with_api;
use crate::cli::output::emit;
use crate::cli::parser::{Cli, Commands, LogAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::{check_period, in_period};
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;
use crate::utils::time::{format_local, parse_timestamp};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Log { action } = &cli.command else {
        return Ok(());
    };

    with_api(cli, cfg, |api, tokens, json| {
        let ctx = api.resolve(tokens)?;

        match action {
            LogAction::Add {
                start,
                end,
                description,
            } => {
                let req = TimeLogRequest::Iso {
                    start_time: parse_timestamp(start)?,
                    end_time: parse_timestamp(end)?,
                    description: description.clone(),
                };
                let logged = api.log_time(&ctx, req)?;
                emit(json, &logged, |l| {
                    success(format!(
                        "Logged {} on {} (#{})",
                        secs2readable(l.log.duration),
                        l.log.date,
                        l.log.id
                    ))
                })
            }

            LogAction::List { period } => {
                let mut view = api.get_logs(&ctx)?;
                if let Some(p) = period {
                    check_period(p)?;
                    view.logs.retain(|l| in_period(&l.date, p) == Some(true));
                    view.stats.retain(|s| in_period(&s.date, p) == Some(true));
                }
                emit(json, &view, |view| {
                    if view.logs.is_empty() {
                        info("No time logs yet.");
                        return;
                    }
                    let mut table =
                        Table::new(&["ID", "Date", "Start", "End", "Duration", "Description"]);
                    for l in &view.logs {
                        table.add_row(vec![
                            l.id.to_string(),
                            l.date.to_string(),
                            format_local(&l.start_time),
                            format_local(&l.end_time),
                            secs2readable(l.duration),
                            l.description.clone(),
                        ]);
                    }
                    print!("{}", table.render());
                })
            }
        }
    })
}

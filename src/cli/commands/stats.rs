use crate::cli::context::with_api;
use crate::cli::output::emit;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::TimeLogStore;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::{check_period, in_period};
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Stats { period } = &cli.command else {
        return Ok(());
    };

    with_api(cli, cfg, |api, tokens, json| {
        let ctx = api.resolve(tokens)?;
        let mut stats = TimeLogStore::new(api.storage()).daily_stats(&ctx)?;

        if let Some(p) = period {
            check_period(p)?;
            stats.retain(|s| in_period(&s.date, p) == Some(true));
        }

        emit(json, &stats, |stats| {
            if stats.is_empty() {
                info("No time logged yet.");
                return;
            }
            let mut table = Table::new(&["Date", "Sessions", "Total"]);
            let mut total = 0;
            for s in stats {
                total += s.total_duration;
                table.add_row(vec![
                    s.date.to_string(),
                    s.sessions.to_string(),
                    secs2readable(s.total_duration),
                ]);
            }
            print!("{}", table.render());
            println!("Total: {}", secs2readable(total));
        })
    })
}

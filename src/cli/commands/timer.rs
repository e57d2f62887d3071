use crate::api::TimeLogRequest;
use crate::cli::context::with_api;
use crate::cli::output::emit;
use crate::cli::parser::{Cli, Commands, TimerAction};
use crate::config::Config;
use crate::core::Stopwatch;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{secs2clock, secs2readable};
use crate::utils::time::format_local;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct TimerStatus {
    running: bool,
    started_at: Option<String>,
    elapsed: Option<i64>,
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Timer { action } = &cli.command else {
        return Ok(());
    };

    with_api(cli, cfg, |api, tokens, json| {
        // Resolve first so the device id exists before the stopwatch runs.
        let ctx = api.resolve(tokens)?;

        match action {
            TimerAction::Start => {
                let started = Stopwatch::new(tokens).start(Utc::now())?;
                let status = TimerStatus {
                    running: true,
                    started_at: Some(started.to_rfc3339()),
                    elapsed: Some(0),
                };
                emit(json, &status, |_| {
                    success(format!("Stopwatch started at {}", format_local(&started)))
                })
            }

            TimerAction::Stop { description } => {
                let logged = Stopwatch::new(tokens).stop(Utc::now(), |start, end| {
                    api.log_time(
                        &ctx,
                        TimeLogRequest::Iso {
                            start_time: start,
                            end_time: end,
                            description: description.clone(),
                        },
                    )
                })?;
                emit(json, &logged, |l| {
                    success(format!(
                        "Stopwatch stopped: {} logged (#{})",
                        secs2readable(l.log.duration),
                        l.log.id
                    ))
                })
            }

            TimerAction::Status => {
                let since = Stopwatch::new(tokens).running_since()?;
                let status = TimerStatus {
                    running: since.is_some(),
                    started_at: since.map(|s| s.to_rfc3339()),
                    elapsed: since.map(|s| (Utc::now() - s).num_seconds().max(0)),
                };
                emit(json, &status, |st| match st.elapsed {
                    Some(elapsed) => info(format!("Stopwatch running: {}", secs2clock(elapsed))),
                    None => info("Stopwatch is not running."),
                })
            }

            TimerAction::Reset => {
                Stopwatch::new(tokens).reset()?;
                let status = TimerStatus {
                    running: false,
                    started_at: None,
                    elapsed: None,
                };
                emit(json, &status, |_| info("Stopwatch reset."))
            }
        }
    })
}

use crate::api::CreateTaskRequest;
use crate::cli::context::with_api;
use crate::cli::output::emit;
use crate::cli::parser::{Cli, Commands, TaskAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_completed};
use crate::utils::formatting::check_mark;
use crate::utils::table::Table;
use crate::utils::time::format_local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = &cli.command else {
        return Ok(());
    };

    with_api(cli, cfg, |api, tokens, json| {
        let ctx = api.resolve(tokens)?;

        match action {
            TaskAction::Add { text } => {
                let task = api.create_task(
                    &ctx,
                    CreateTaskRequest {
                        text: text.join(" "),
                    },
                )?;
                emit(json, &task, |t| {
                    success(format!("Task #{} created: {}", t.id, t.text))
                })
            }

            TaskAction::List { open } => {
                let mut tasks = api.list_tasks(&ctx)?;
                if *open {
                    tasks.retain(|t| !t.completed);
                }
                emit(json, &tasks, |tasks| {
                    if tasks.is_empty() {
                        info("No tasks yet.");
                        return;
                    }
                    let mut table = Table::new(&["ID", "Done", "Created", "Task"]);
                    for t in tasks {
                        table.add_row(vec![
                            t.id.to_string(),
                            check_mark(t.completed).to_string(),
                            format_local(&t.created_at),
                            t.text.clone(),
                        ]);
                    }
                    print!("{}", table.render());
                })
            }

            TaskAction::Toggle { id } => {
                let view = api.toggle_task(&ctx, *id)?;
                emit(json, &view, |v| {
                    let color = color_for_completed(v.completed);
                    let state = if v.completed { "done" } else { "open" };
                    success(format!("Task #{} is now {}{}{}", id, color, state, RESET))
                })
            }

            TaskAction::Del { id } => {
                let view = api.delete_task(&ctx, *id)?;
                emit(json, &view, |_| success(format!("Task #{} deleted", id)))
            }
        }
    })
}

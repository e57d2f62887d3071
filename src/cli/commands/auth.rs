use crate::api::Credentials;
use crate::cli::context::with_api;
use crate::cli::output::emit;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle `signup`, `login`, `logout` and `whoami`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    with_api(cli, cfg, |api, tokens, json| match &cli.command {
        Commands::Signup { email, password } => {
            let body = api.sign_up(Credentials {
                email: email.clone(),
                password: password.clone(),
            })?;
            emit(json, &body, |b| {
                success(b.message.clone().unwrap_or_default())
            })
        }

        Commands::Login { email, password } => {
            let view = api.sign_in(
                tokens,
                Credentials {
                    email: email.clone(),
                    password: password.clone(),
                },
            )?;
            emit(json, &view, |v| {
                success(format!("Signed in as {}", email));
                if v.claimed > 0 {
                    info(format!("{} records moved from this device to your account", v.claimed));
                }
            })
        }

        Commands::Logout => {
            let body = api.sign_out(tokens)?;
            emit(json, &body, |_| success("Signed out"))
        }

        Commands::Whoami => {
            let ctx = api.resolve(tokens)?;
            let view = api.whoami(&ctx);
            emit(json, &view, |v| {
                println!("Owner : {}", v.owner_key);
                if let Some(d) = &v.device_id {
                    println!("Device: {}", d);
                }
                if let Some(u) = &v.user_id {
                    println!("User  : {}", u);
                }
            })
        }

        _ => Ok(()),
    })
}

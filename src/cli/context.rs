use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::api::Api;
use crate::identity::{FileTokenStore, LocalIdentityProvider};
use crate::storage::{self, Storage};

/// Everything a command needs for one invocation: the opened backend and
/// the session file standing in for the browser cookie jar.
pub struct CliSession {
    pub storage: Box<dyn Storage>,
    pub tokens: FileTokenStore,
    pub json: bool,
}

impl CliSession {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let storage = storage::open(cfg)?;
        let session_path = cli.session.as_deref().unwrap_or(&cfg.session_file);
        let tokens = FileTokenStore::open(session_path)?;
        Ok(Self {
            storage,
            tokens,
            json: cli.json,
        })
    }
}

/// Open the session, build the request boundary and hand both to `func`.
pub fn with_api<T>(
    cli: &Cli,
    cfg: &Config,
    func: impl FnOnce(&Api, &mut FileTokenStore, bool) -> AppResult<T>,
) -> AppResult<T> {
    let CliSession {
        storage,
        mut tokens,
        json,
    } = CliSession::open(cli, cfg)?;
    let provider = LocalIdentityProvider::new(storage.as_ref());
    let api = Api::new(
        storage.as_ref(),
        &provider,
        cfg.identity,
        cfg.cookie_max_age_secs,
    );
    func(&api, &mut tokens, json)
}

//! Identity resolution: turns a request-scoped token store (cookie jar or
//! CLI session file) into the owner key every store call is scoped by.

pub mod auth;
pub mod cookie;
pub mod session;

use crate::errors::{AppError, AppResult};
use crate::models::OwnerKey;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use auth::{IdentityProvider, LocalIdentityProvider};
pub use cookie::CookieJar;
pub use session::FileTokenStore;

pub const DEVICE_COOKIE: &str = "device_id";
pub const SESSION_COOKIE: &str = "session_token";

/// How callers are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// Anonymous device id first; a valid session upgrades the caller to
    /// their user id.
    #[default]
    Anonymous,
    /// A valid session is mandatory.
    Authenticated,
}

/// Request-scoped key/value store that carries identity between calls.
pub trait TokenStore {
    fn get(&self, name: &str) -> Option<String>;

    /// Store `value`; `max_age_secs = None` means "for the session".
    fn set(&mut self, name: &str, value: &str, max_age_secs: Option<i64>) -> AppResult<()>;

    fn remove(&mut self, name: &str) -> AppResult<()>;
}

/// The resolved caller, threaded explicitly into every store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub owner: OwnerKey,
    pub device_id: Option<String>,
    pub user_id: Option<String>,
    /// True when this request minted a new device id.
    pub new_device: bool,
}

impl RequestContext {
    pub fn for_owner(owner: OwnerKey) -> Self {
        Self {
            owner,
            device_id: None,
            user_id: None,
            new_device: false,
        }
    }

    pub fn owner(&self) -> &OwnerKey {
        &self.owner
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

pub struct IdentityResolver<'a> {
    mode: IdentityMode,
    cookie_max_age_secs: i64,
    provider: Option<&'a dyn IdentityProvider>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(mode: IdentityMode, cookie_max_age_secs: i64) -> Self {
        Self {
            mode,
            cookie_max_age_secs,
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: &'a dyn IdentityProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn resolve(&self, tokens: &mut dyn TokenStore) -> AppResult<RequestContext> {
        let user_id = self.verified_user(tokens)?;

        if let Some(user_id) = user_id {
            let device_id = tokens.get(DEVICE_COOKIE).filter(|d| !d.trim().is_empty());
            return Ok(RequestContext {
                owner: OwnerKey::user(&user_id),
                device_id,
                user_id: Some(user_id),
                new_device: false,
            });
        }

        if self.mode == IdentityMode::Authenticated {
            return Err(AppError::Auth("Authentication required".into()));
        }

        let (device_id, new_device) = self.device_id(tokens)?;
        Ok(RequestContext {
            owner: OwnerKey::device(&device_id),
            device_id: Some(device_id),
            user_id: None,
            new_device,
        })
    }

    /// User id behind the session token, if present and still valid.
    /// Stale tokens are dropped from the store.
    fn verified_user(&self, tokens: &mut dyn TokenStore) -> AppResult<Option<String>> {
        let Some(token) = tokens.get(SESSION_COOKIE).filter(|t| !t.trim().is_empty()) else {
            return Ok(None);
        };
        let Some(provider) = self.provider else {
            return Ok(None);
        };

        match provider.verify(&token)? {
            Some(user_id) => Ok(Some(user_id)),
            None => {
                tokens.remove(SESSION_COOKIE)?;
                if self.mode == IdentityMode::Authenticated {
                    Err(AppError::Auth("Session expired or invalid".into()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn device_id(&self, tokens: &mut dyn TokenStore) -> AppResult<(String, bool)> {
        if let Some(existing) = tokens.get(DEVICE_COOKIE)
            && !existing.trim().is_empty()
        {
            return Ok((existing, false));
        }

        let id = new_device_id();
        tokens.set(DEVICE_COOKIE, &id, Some(self.cookie_max_age_secs))?;
        Ok((id, true))
    }
}

/// Globally unique device identifier (random UUID v4).
pub fn new_device_id() -> String {
    Uuid::new_v4().to_string()
}

//! Transport-agnostic request boundary.
//!
//! One handler per endpoint. Handlers take the already-resolved
//! [`RequestContext`] and typed payloads and return typed views;
//! [`Api::reply`] turns any result into a status code plus JSON body, with
//! errors rendered as `{"error": <message>}`.

pub mod payload;
pub mod views;

use crate::core::{TaskStore, TimeLogStore, audit};
use crate::errors::{AppError, AppResult};
use crate::identity::{
    IdentityMode, IdentityProvider, IdentityResolver, RequestContext, SESSION_COOKIE, TokenStore,
};
use crate::models::OwnerKey;
use crate::storage::Storage;
use serde::Serialize;
use serde_json::Value;

pub use payload::{CreateTaskRequest, Credentials, TimeLogRequest, parse_body};
pub use views::{
    DashboardView, ErrorBody, LoggedTime, LogsView, SignInView, SuccessBody, TaskView,
    TimeLogView, ToggleView, WhoAmIView,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn from_result<T: Serialize>(result: AppResult<T>) -> Self {
        match result.and_then(|v| serde_json::to_value(v).map_err(AppError::from)) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        let body = serde_json::to_value(ErrorBody {
            error: err.to_string(),
        })
        .unwrap_or(Value::Null);
        Self {
            status: err.status_code(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct Api<'a> {
    storage: &'a dyn Storage,
    provider: &'a dyn IdentityProvider,
    mode: IdentityMode,
    cookie_max_age_secs: i64,
}

impl<'a> Api<'a> {
    pub fn new(
        storage: &'a dyn Storage,
        provider: &'a dyn IdentityProvider,
        mode: IdentityMode,
        cookie_max_age_secs: i64,
    ) -> Self {
        Self {
            storage,
            provider,
            mode,
            cookie_max_age_secs,
        }
    }

    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    fn resolver(&self) -> IdentityResolver<'a> {
        IdentityResolver::new(self.mode, self.cookie_max_age_secs).with_provider(self.provider)
    }

    /// Resolve the caller from cookies or the session file.
    pub fn resolve(&self, tokens: &mut dyn TokenStore) -> AppResult<RequestContext> {
        self.resolver().resolve(tokens)
    }

    /// Convert a handler result, recording backend failures in the audit trail.
    pub fn reply<T: Serialize>(&self, result: AppResult<T>) -> ApiReply {
        if let Err(e) = &result
            && e.is_backend()
        {
            audit::record(self.storage, "error", e.kind(), &e.to_string());
        }
        ApiReply::from_result(result)
    }

    // ---------------------------
    // GET /
    // ---------------------------
    pub fn dashboard(&self, ctx: &RequestContext) -> AppResult<DashboardView> {
        let tasks = TaskStore::new(self.storage).list(ctx)?;
        let LogsView { logs, stats } = self.get_logs(ctx)?;
        Ok(DashboardView {
            tasks: tasks.into_iter().map(TaskView::from).collect(),
            logs,
            stats,
        })
    }

    // ---------------------------
    // /api/tasks
    // ---------------------------
    pub fn list_tasks(&self, ctx: &RequestContext) -> AppResult<Vec<TaskView>> {
        let tasks = TaskStore::new(self.storage).list(ctx)?;
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    pub fn create_task(&self, ctx: &RequestContext, req: CreateTaskRequest) -> AppResult<TaskView> {
        Ok(TaskStore::new(self.storage).create(ctx, &req.text)?.into())
    }

    pub fn toggle_task(&self, ctx: &RequestContext, id: i64) -> AppResult<ToggleView> {
        let completed = TaskStore::new(self.storage).toggle(ctx, id)?;
        Ok(ToggleView {
            success: true,
            completed,
        })
    }

    pub fn delete_task(&self, ctx: &RequestContext, id: i64) -> AppResult<SuccessBody> {
        TaskStore::new(self.storage).delete(ctx, id)?;
        Ok(SuccessBody::ok())
    }

    // ---------------------------
    // /api/time-logs, /log_time, /get_logs
    // ---------------------------
    pub fn log_time(&self, ctx: &RequestContext, req: TimeLogRequest) -> AppResult<LoggedTime> {
        let (start, end) = req.span()?;
        let log = TimeLogStore::new(self.storage).create(ctx, start, end, req.description())?;
        Ok(LoggedTime {
            success: true,
            message: "Time logged".into(),
            log: log.into(),
        })
    }

    pub fn get_logs(&self, ctx: &RequestContext) -> AppResult<LogsView> {
        let store = TimeLogStore::new(self.storage);
        let logs = store.list(ctx)?;
        let stats = crate::models::aggregate_daily(&logs);
        Ok(LogsView {
            logs: logs.into_iter().map(TimeLogView::from).collect(),
            stats,
        })
    }

    // ---------------------------
    // /signup, /login, /logout
    // ---------------------------
    pub fn sign_up(&self, creds: Credentials) -> AppResult<SuccessBody> {
        let account = self.provider.sign_up(&creds.email, &creds.password)?;
        audit::record(self.storage, "signup", &account.email, "Account created");
        Ok(SuccessBody::with_message(format!(
            "Account created for {}",
            account.email
        )))
    }

    /// Open a session and move the caller's anonymous records to the user.
    pub fn sign_in(&self, tokens: &mut dyn TokenStore, creds: Credentials) -> AppResult<SignInView> {
        let session = self.provider.sign_in(&creds.email, &creds.password)?;
        tokens.set(SESSION_COOKIE, &session.token, None)?;

        let user = OwnerKey::user(&session.user_id);
        let claimed = match tokens.get(crate::identity::DEVICE_COOKIE) {
            Some(device) if !device.trim().is_empty() => {
                self.storage.reassign_owner(&OwnerKey::device(&device), &user)?
            }
            _ => 0,
        };

        audit::record(
            self.storage,
            "login",
            &session.user_id,
            &format!("Signed in, {} records claimed", claimed),
        );
        Ok(SignInView {
            success: true,
            user_id: session.user_id,
            claimed,
        })
    }

    pub fn sign_out(&self, tokens: &mut dyn TokenStore) -> AppResult<SuccessBody> {
        if let Some(token) = tokens.get(SESSION_COOKIE) {
            self.provider.sign_out(&token)?;
            tokens.remove(SESSION_COOKIE)?;
            audit::record(self.storage, "logout", "", "Signed out");
        }
        Ok(SuccessBody::with_message("Signed out"))
    }

    pub fn whoami(&self, ctx: &RequestContext) -> WhoAmIView {
        WhoAmIView {
            owner_key: ctx.owner.to_string(),
            device_id: ctx.device_id.clone(),
            user_id: ctx.user_id.clone(),
            authenticated: ctx.is_authenticated(),
        }
    }
}

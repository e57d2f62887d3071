use crate::core::audit;
use crate::errors::{AppError, AppResult};
use crate::identity::RequestContext;
use crate::models::Task;
use crate::storage::Storage;
use chrono::Utc;

/// Task operations, always scoped to the caller's owner key.
pub struct TaskStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> TaskStore<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, ctx: &RequestContext, text: &str) -> AppResult<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Task text must not be empty".into()));
        }

        let task = self.storage.insert_task(ctx.owner(), text, Utc::now())?;
        audit::record(
            self.storage,
            "task_add",
            &format!("#{}", task.id),
            &format!("Task created: {}", task.text),
        );
        Ok(task)
    }

    pub fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Task>> {
        self.storage.list_tasks(ctx.owner())
    }

    /// Returns the new `completed` value.
    pub fn toggle(&self, ctx: &RequestContext, id: i64) -> AppResult<bool> {
        let completed = self.storage.toggle_task(ctx.owner(), id)?;
        audit::record(
            self.storage,
            "task_toggle",
            &format!("#{}", id),
            if completed {
                "Task marked as done"
            } else {
                "Task reopened"
            },
        );
        Ok(completed)
    }

    pub fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        self.storage.delete_task(ctx.owner(), id)?;
        audit::record(self.storage, "task_del", &format!("#{}", id), "Task deleted");
        Ok(())
    }
}

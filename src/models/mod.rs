pub mod account;
pub mod audit;
pub mod daily_stat;
pub mod owner;
pub mod task;
pub mod time_log;

pub use account::{Account, AuthSession};
pub use audit::AuditEntry;
pub use daily_stat::{DailyStat, aggregate_daily};
pub use owner::{OwnerKey, OwnerKind};
pub use task::Task;
pub use time_log::{NewTimeLog, TimeLog};

pub mod audit;
pub mod backup;
pub mod log;
pub mod tasks;
pub mod time_logs;
pub mod timer;

pub use tasks::TaskStore;
pub use time_logs::TimeLogStore;
pub use timer::Stopwatch;

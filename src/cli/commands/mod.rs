pub mod audit;
pub mod auth;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod stats;
pub mod task;
pub mod timer;

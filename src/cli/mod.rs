pub mod commands;
pub mod context;
pub mod output;
pub mod parser;

use crate::export::{ExportFormat, ExportKind};
use crate::storage::Backend;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStopwatch
/// Task list and stopwatch time log with per-day totals
#[derive(Parser)]
#[command(
    name = "rstopwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small task list and stopwatch time log with per-day totals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the storage backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<Backend>,

    /// Override the session file that carries the device id and login
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Print JSON responses instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Record or list time logs
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Show per-day totals
    Stats {
        #[arg(long, short, help = "Filter by YYYY, YYYY-MM or YYYY-MM-DD")]
        period: Option<String>,
    },

    /// Stopwatch: start, stop (creates a time log), status
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in; records of this device move to the account
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the resolved identity
    Whoami,

    /// Print the internal audit log
    Audit {
        #[arg(long = "print", help = "Print rows from the internal log")]
        print: bool,
    },

    /// Manage the SQLite database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Create a backup copy of the data file
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export logs, stats or tasks
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_enum, default_value = "logs")]
        what: ExportKind,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks, newest first
    List {
        #[arg(long, help = "Only tasks not completed yet")]
        open: bool,
    },

    /// Flip a task between open and done
    Toggle { id: i64 },

    /// Delete a task
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum LogAction {
    /// Record a finished session
    Add {
        #[arg(long = "start", help = "RFC3339, 'YYYY-MM-DD HH:MM' or 'HH:MM' (local)")]
        start: String,

        #[arg(long = "end", help = "RFC3339, 'YYYY-MM-DD HH:MM' or 'HH:MM' (local)")]
        end: String,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// List time logs, newest first
    List {
        #[arg(long, short, help = "Filter by YYYY, YYYY-MM or YYYY-MM-DD")]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the stopwatch
    Start,

    /// Stop the stopwatch and log the session
    Stop {
        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Show whether the stopwatch is running
    Status,

    /// Discard the running session without logging it
    Reset,
}

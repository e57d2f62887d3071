use crate::errors::{AppError, AppResult};
use crate::identity::IdentityMode;
use crate::storage::Backend;
use crate::utils::path::{expand_tilde, resolve_in};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One year, the lifetime of the anonymous `device_id` cookie.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 31_536_000;

/// Upper bound for `cookie_max_age_secs`: ten years.
pub const MAX_COOKIE_MAX_AGE_SECS: i64 = 10 * DEFAULT_COOKIE_MAX_AGE_SECS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub identity: IdentityMode,
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_secs: i64,
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_cookie_max_age() -> i64 {
    DEFAULT_COOKIE_MAX_AGE_SECS
}

fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file(Backend::Sqlite)
                .to_string_lossy()
                .to_string(),
            backend: Backend::Sqlite,
            identity: IdentityMode::Anonymous,
            cookie_max_age_secs: default_cookie_max_age(),
            session_file: default_session_file(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rstopwatch")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rstopwatch")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rstopwatch.conf")
    }

    /// Default data file for the given backend
    pub fn database_file(backend: Backend) -> PathBuf {
        match backend {
            Backend::Json => Self::config_dir().join("rstopwatch.json"),
            _ => Self::config_dir().join("rstopwatch.sqlite"),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.session_file = expand_tilde(&cfg.session_file)
            .to_string_lossy()
            .to_string();
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_COOKIE_MAX_AGE_SECS).contains(&self.cookie_max_age_secs) {
            return Err(AppError::Config(format!(
                "cookie_max_age_secs must be between 1 and {}, got {}",
                MAX_COOKIE_MAX_AGE_SECS, self.cookie_max_age_secs
            )));
        }
        if self.backend.is_file_backed() && self.database.trim().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Initialize configuration and data files
    pub fn init_all(
        custom_db: Option<String>,
        backend: Backend,
        is_test: bool,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            resolve_in(&dir, &name)
        } else {
            Self::database_file(backend)
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            backend,
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}

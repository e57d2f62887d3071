//! File-backed token store used by the CLI in place of a browser cookie jar.

use super::TokenStore;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

pub struct FileTokenStore {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl FileTokenStore {
    /// Load the store; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

fn expiry_after(secs: i64) -> AppResult<DateTime<Utc>> {
    TimeDelta::try_seconds(secs)
        .and_then(|age| Utc::now().checked_add_signed(age))
        .ok_or_else(|| AppError::Config(format!("token max age out of range: {} seconds", secs)))
}

impl TokenStore for FileTokenStore {
    fn get(&self, name: &str) -> Option<String> {
        let entry = self.entries.get(name)?;
        match entry.expires_at {
            Some(at) if at <= Utc::now() => None,
            _ => Some(entry.value.clone()),
        }
    }

    fn set(&mut self, name: &str, value: &str, max_age_secs: Option<i64>) -> AppResult<()> {
        let expires_at = match max_age_secs {
            Some(secs) => Some(expiry_after(secs)?),
            None => None,
        };
        self.entries.insert(
            name.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.save()
    }

    fn remove(&mut self, name: &str) -> AppResult<()> {
        if self.entries.remove(name).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

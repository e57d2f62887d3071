use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key that scopes every task and time log to one caller.
///
/// Anonymous devices and authenticated users live in separate namespaces
/// (`device:<uuid>` / `user:<uuid>`), so the two can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Device,
    User,
}

impl OwnerKey {
    const DEVICE_PREFIX: &'static str = "device:";
    const USER_PREFIX: &'static str = "user:";

    pub fn device(id: &str) -> Self {
        Self(format!("{}{}", Self::DEVICE_PREFIX, id))
    }

    pub fn user(id: &str) -> Self {
        Self(format!("{}{}", Self::USER_PREFIX, id))
    }

    /// Rebuild a key from its stored form.
    pub fn from_db_str(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> Option<OwnerKind> {
        if self.0.starts_with(Self::DEVICE_PREFIX) {
            Some(OwnerKind::Device)
        } else if self.0.starts_with(Self::USER_PREFIX) {
            Some(OwnerKind::User)
        } else {
            None
        }
    }

    /// The identifier without its namespace prefix.
    pub fn id(&self) -> &str {
        self.0
            .strip_prefix(Self::DEVICE_PREFIX)
            .or_else(|| self.0.strip_prefix(Self::USER_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

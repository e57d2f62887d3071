//! Email/password authentication.
//!
//! `IdentityProvider` is the seam to whatever identity service issues
//! session tokens. `LocalIdentityProvider` keeps accounts and sessions in the
//! configured storage backend.

use crate::errors::{AppError, AppResult};
use crate::models::{Account, AuthSession};
use crate::storage::Storage;
use chrono::Utc;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

pub trait IdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> AppResult<Account>;

    /// Check credentials and open a new session.
    fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// User id for a live session token, `None` when unknown.
    fn verify(&self, token: &str) -> AppResult<Option<String>>;

    fn sign_out(&self, token: &str) -> AppResult<()>;
}

pub struct LocalIdentityProvider<'a> {
    storage: &'a dyn Storage,
}

impl<'a> LocalIdentityProvider<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::Validation(format!("Invalid email address: '{}'", email)));
    }
    Ok(email)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut s = String::with_capacity(64);
    for b in out {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// `<salt>$<sha256(salt:password)>`
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = sha256_hex(format!("{}:{}", salt, password).as_bytes());
    format!("{}${}", salt, digest)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => sha256_hex(format!("{}:{}", salt, password).as_bytes()) == digest,
        None => false,
    }
}

impl IdentityProvider for LocalIdentityProvider<'_> {
    fn sign_up(&self, email: &str, password: &str) -> AppResult<Account> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };
        self.storage.insert_account(&account)?;
        Ok(account)
    }

    fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let invalid = || AppError::Auth("Invalid credentials".into());

        let email = normalize_email(email).map_err(|_| invalid())?;
        let account = self
            .storage
            .find_account_by_email(&email)?
            .ok_or_else(invalid)?;

        if !verify_password(password, &account.password_hash) {
            return Err(invalid());
        }

        let session = AuthSession {
            token: Uuid::new_v4().to_string(),
            user_id: account.id,
            created_at: Utc::now(),
        };
        self.storage.insert_session(&session)?;
        Ok(session)
    }

    fn verify(&self, token: &str) -> AppResult<Option<String>> {
        Ok(self.storage.find_session(token)?.map(|s| s.user_id))
    }

    fn sign_out(&self, token: &str) -> AppResult<()> {
        self.storage.delete_session(token)?;
        Ok(())
    }
}

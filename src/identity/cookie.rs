//! Cookie-backed token store for HTTP front-ends.
//!
//! Incoming values are parsed from a `Cookie:` request header; every change
//! is recorded so the caller can emit matching `Set-Cookie` headers.

use super::TokenStore;
use crate::errors::AppResult;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age_secs: Option<i64>,
}

impl SetCookie {
    /// Render the value of a `Set-Cookie` response header.
    pub fn header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(age) = self.max_age_secs {
            out.push_str(&format!("; Max-Age={}", age));
        }
        out.push_str("; Path=/; HttpOnly; SameSite=Lax");
        out
    }
}

#[derive(Debug, Default, Clone)]
pub struct CookieJar {
    values: BTreeMap<String, String>,
    outgoing: Vec<SetCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie:` header (`a=1; b=2`). Malformed pairs are skipped.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim().trim_matches('"');
            if !name.is_empty() {
                jar.values.insert(name.to_string(), value.to_string());
            }
        }
        jar
    }

    /// Cookies changed during this request, in order.
    pub fn outgoing(&self) -> &[SetCookie] {
        &self.outgoing
    }

    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.outgoing.iter().map(SetCookie::header_value).collect()
    }
}

impl TokenStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str, max_age_secs: Option<i64>) -> AppResult<()> {
        self.values.insert(name.to_string(), value.to_string());
        self.outgoing.push(SetCookie {
            name: name.to_string(),
            value: value.to_string(),
            max_age_secs,
        });
        Ok(())
    }

    fn remove(&mut self, name: &str) -> AppResult<()> {
        self.values.remove(name);
        // Expire it on the client as well.
        self.outgoing.push(SetCookie {
            name: name.to_string(),
            value: String::new(),
            max_age_secs: Some(0),
        });
        Ok(())
    }
}

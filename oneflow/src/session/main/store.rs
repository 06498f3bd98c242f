use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use headers::{Cookie, HeaderMapExt};
use http::HeaderMap;

use crate::session::config::SESSION_COOKIE_SECURE;
use crate::session::errors::SessionError;
use crate::session::types::SessionStore;
use crate::utils::header_set_cookie;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingCookie {
    Set { value: String, max_age: i64 },
    Clear,
}

/// Session store backed by HTTP cookies.
///
/// Reads the request's `Cookie` header once; writes are collected and turned
/// into `Set-Cookie` headers by [`CookieSessionStore::into_headers`]. Later
/// writes to the same name replace earlier ones, so a clear followed by a set
/// produces a single header.
#[derive(Debug, Clone, Default)]
pub struct CookieSessionStore {
    incoming: HashMap<String, String>,
    pending: BTreeMap<String, PendingCookie>,
    secure: bool,
}

impl CookieSessionStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let incoming = headers
            .typed_get::<Cookie>()
            .map(|cookie| {
                cookie
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            incoming,
            pending: BTreeMap::new(),
            secure: *SESSION_COOKIE_SECURE,
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// `Set-Cookie` headers for every write made through this store.
    pub fn into_headers(self) -> Result<HeaderMap, SessionError> {
        let mut headers = HeaderMap::new();
        for (name, cookie) in &self.pending {
            match cookie {
                PendingCookie::Set { value, max_age } => {
                    header_set_cookie(&mut headers, name, value, *max_age, self.secure)?;
                }
                PendingCookie::Clear => {
                    header_set_cookie(&mut headers, name, "", 0, self.secure)?;
                }
            }
        }
        Ok(headers)
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}

fn validate_cookie(name: &str, value: &str) -> Result<(), SessionError> {
    if name.is_empty() || !name.chars().all(is_token_char) {
        return Err(SessionError::Cookie(format!("Invalid cookie name {name:?}")));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\'))
    {
        return Err(SessionError::Cookie(
            "Cookie value contains forbidden characters".to_string(),
        ));
    }
    Ok(())
}

impl SessionStore for CookieSessionStore {
    fn get(&self, name: &str) -> Option<String> {
        match self.pending.get(name) {
            Some(PendingCookie::Set { value, .. }) => Some(value.clone()),
            Some(PendingCookie::Clear) => None,
            None => self.incoming.get(name).cloned(),
        }
    }

    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError> {
        validate_cookie(name, value)?;
        self.pending.insert(
            name.to_string(),
            PendingCookie::Set {
                value: value.to_string(),
                max_age: ttl.num_seconds(),
            },
        );
        Ok(())
    }

    fn clear(&mut self, name: &str) -> Result<(), SessionError> {
        validate_cookie(name, "")?;
        self.pending.insert(name.to_string(), PendingCookie::Clear);
        Ok(())
    }
}

/// In-process session store with expiry, for tools and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, (String, DateTime<Utc>)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(value, _)| value.clone())
    }

    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError> {
        self.entries
            .insert(name.to_string(), (value.to_string(), Utc::now() + ttl));
        Ok(())
    }

    fn clear(&mut self, name: &str) -> Result<(), SessionError> {
        self.entries.remove(name);
        Ok(())
    }
}

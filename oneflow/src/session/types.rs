use chrono::Duration;
use serde::Serialize;

use super::errors::SessionError;

/// Client-side storage for session tokens, keyed by session name.
///
/// Injected into every session operation instead of reaching for ambient
/// request state.
pub trait SessionStore {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError>;

    fn clear(&mut self, name: &str) -> Result<(), SessionError>;
}

/// Outcome of checking a session cookie against the store of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Closed,
}

impl SessionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::Open)
    }

    /// Body text understood by the existing front end.
    pub fn as_legacy_str(&self) -> &'static str {
        match self {
            SessionStatus::Open => "have session opened",
            SessionStatus::Closed => "no have session",
        }
    }
}

//! Error kinds shared by the data access layer and the session manager

use serde::Serialize;

/// Stable, caller-safe classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConnectionFailed,
    Timeout,
    Validation,
    NotFound,
    QueryFailed,
    NoSession,
    TokenCollisionExhausted,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionFailed => "connection_failed",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::QueryFailed => "query_failed",
            ErrorKind::NoSession => "no_session",
            ErrorKind::TokenCollisionExhausted => "token_collision_exhausted",
            ErrorKind::Internal => "internal",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionFailed => "Could not connect to the database",
            ErrorKind::Timeout => "The database did not answer in time",
            ErrorKind::Validation => "Invalid request parameters",
            ErrorKind::NotFound => "No matching row",
            ErrorKind::QueryFailed => "The query could not be executed",
            ErrorKind::NoSession => "No session",
            ErrorKind::TokenCollisionExhausted => "Could not issue a unique token",
            ErrorKind::Internal => "Internal error",
        }
    }
}

//! Database connection configuration

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use super::types::Backend;

/// Backend used for connection parameters built from request forms.
pub static DB_BACKEND: LazyLock<Backend> =
    LazyLock::new(|| parse_backend(env::var("ONEFLOW_DB_TYPE").ok()));

pub static DB_DEFAULT_PORT: LazyLock<u16> =
    LazyLock::new(|| parse_port(env::var("ONEFLOW_DB_PORT").ok()));

/// Upper bound for opening a connection and, separately, for running the statement.
pub static DB_TIMEOUT: LazyLock<Duration> =
    LazyLock::new(|| parse_timeout(env::var("ONEFLOW_DB_TIMEOUT_SECS").ok()));

fn parse_backend(raw: Option<String>) -> Backend {
    match raw {
        None => Backend::MySql,
        Some(s) => s.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; falling back to mysql", e);
            Backend::MySql
        }),
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(3306)
}

fn parse_timeout(raw: Option<String>) -> Duration {
    Duration::from_secs(raw.and_then(|s| s.parse().ok()).unwrap_or(10))
}

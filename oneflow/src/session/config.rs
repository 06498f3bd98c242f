use std::sync::LazyLock;

const DEFAULT_COOKIE_MAX_AGE: u64 = 30 * 24 * 60 * 60;
// Browsers cap cookie lifetimes at 400 days.
const MAX_COOKIE_MAX_AGE: u64 = 400 * 24 * 60 * 60;
const DEFAULT_TOKEN_MAX_ATTEMPTS: usize = 5;

/// Lifetime of a session cookie in seconds. Defaults to 30 days, capped at 400 days.
pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| parse_max_age(std::env::var("SESSION_COOKIE_MAX_AGE").ok()));

/// Whether session cookies carry the `Secure` attribute.
pub static SESSION_COOKIE_SECURE: LazyLock<bool> =
    LazyLock::new(|| parse_secure(std::env::var("SESSION_COOKIE_SECURE").ok()));

/// How many fresh tokens are tried before giving up on uniqueness.
pub static TOKEN_MAX_ATTEMPTS: LazyLock<usize> =
    LazyLock::new(|| parse_max_attempts(std::env::var("TOKEN_MAX_ATTEMPTS").ok()));

/// Random bytes per token; hex encoding doubles the length.
pub(super) const TOKEN_BYTES: usize = 32;

fn parse_max_age(raw: Option<String>) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok())
        .map(|secs| secs.min(MAX_COOKIE_MAX_AGE))
        .unwrap_or(DEFAULT_COOKIE_MAX_AGE)
}

fn parse_secure(raw: Option<String>) -> bool {
    raw.and_then(|s| s.trim().to_ascii_lowercase().parse().ok())
        .unwrap_or(false)
}

fn parse_max_attempts(raw: Option<String>) -> usize {
    raw.and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_TOKEN_MAX_ATTEMPTS)
}

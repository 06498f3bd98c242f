use chrono::Duration;

use crate::dal::{ColumnValues, Database, Identifier, Ordering, Record};
use crate::session::config::SESSION_COOKIE_MAX_AGE;
use crate::session::errors::SessionError;
use crate::session::types::{SessionStatus, SessionStore};

use super::token::OccurrenceCheck;

/// Whether a session cookie named `name` is present. The value is not checked.
pub fn have_session<S: SessionStore + ?Sized>(store: &S, name: &str) -> bool {
    store.get(name).is_some()
}

pub fn get_session_token<S: SessionStore + ?Sized>(store: &S, name: &str) -> Option<String> {
    store.get(name)
}

/// Starts a session named `name` holding `token`, replacing any previous one.
///
/// The cookie lives for `SESSION_COOKIE_MAX_AGE` seconds at path `/`. Calling
/// this twice with the same arguments leaves the same state behind.
pub fn initialize_session<S: SessionStore + ?Sized>(
    store: &mut S,
    token: &str,
    name: &str,
) -> Result<(), SessionError> {
    if token.is_empty() {
        return Err(SessionError::Validation("Token must not be empty".to_string()));
    }
    if name.is_empty() {
        return Err(SessionError::Validation(
            "Session name must not be empty".to_string(),
        ));
    }

    let ttl = i64::try_from(*SESSION_COOKIE_MAX_AGE)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| SessionError::Cookie("Cookie lifetime out of range".to_string()))?;

    store.clear(name)?;
    store.set(name, token, ttl)?;
    tracing::debug!("Initialized session '{}'", name);
    Ok(())
}

/// Ends the session named `name`; the cookie is expired immediately.
pub fn finalize_session<S: SessionStore + ?Sized>(
    store: &mut S,
    name: &str,
) -> Result<(), SessionError> {
    if name.is_empty() {
        return Err(SessionError::Validation(
            "Session name must not be empty".to_string(),
        ));
    }
    store.clear(name)?;
    tracing::debug!("Finalized session '{}'", name);
    Ok(())
}

/// Open when the cookie exists and its token is present in `table.column`.
pub async fn is_this_my_session<S, C>(
    store: &S,
    name: &str,
    checker: &C,
    table: &Identifier,
    column: &Identifier,
    ordering: &Ordering,
) -> Result<SessionStatus, SessionError>
where
    S: SessionStore + ?Sized,
    C: OccurrenceCheck + ?Sized,
{
    let Some(token) = store.get(name).filter(|t| !t.is_empty()) else {
        tracing::debug!("No session cookie '{}' found", name);
        return Ok(SessionStatus::Closed);
    };

    if checker
        .occurrence_exists(table, column, &token, ordering)
        .await?
    {
        Ok(SessionStatus::Open)
    } else {
        tracing::debug!("Session cookie '{}' has no matching record", name);
        Ok(SessionStatus::Closed)
    }
}

/// The row of `table` whose `column` equals the session token.
///
/// `Ok(None)` means the cookie exists but no row carries its token.
pub async fn get_session_record<S: SessionStore + ?Sized>(
    store: &S,
    name: &str,
    database: &Database,
    table: &Identifier,
    column: &Identifier,
) -> Result<Option<Record>, SessionError> {
    let token = store
        .get(name)
        .filter(|t| !t.is_empty())
        .ok_or(SessionError::NoSession)?;

    let filter = ColumnValues::single(column.as_str(), token)?;
    Ok(database.select_one_matching(table, &filter).await?)
}

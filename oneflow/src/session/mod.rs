//! Cookie/token sessions
//!
//! Tokens are minted unique against a table column, handed to the client in a
//! cookie and later matched by value against the same column. There is no
//! server-side session state; every check re-reads the store and re-queries
//! the database.

mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_SECURE, TOKEN_MAX_ATTEMPTS};
pub use errors::SessionError;
pub use main::{
    CookieSessionStore, MemorySessionStore, OccurrenceCheck, finalize_session, generate_token,
    get_session_record, get_session_token, have_session, initialize_session, is_this_my_session,
};
pub use types::{SessionStatus, SessionStore};

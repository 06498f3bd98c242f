//! oneflow - Generic data access layer and cookie/token session manager
//!
//! The data access layer runs a fixed set of parametrized CRUD operations
//! against a MySQL (or SQLite) database named by the caller. The session
//! manager mints unique random tokens, keeps them in a cookie and recognizes
//! a session by finding its token in a caller-chosen table column.

mod dal;
mod errors;
mod session;
mod utils;

#[cfg(test)]
mod test_utils;

pub use errors::ErrorKind;

pub use dal::{
    Backend, CastMode, ColumnValues, Columns, ConnectionParams, DB_BACKEND, DB_DEFAULT_PORT,
    DB_TIMEOUT, DalError, Database, Identifier, Ordering, Record, SortDirection,
};

pub use session::{
    CookieSessionStore, MemorySessionStore, OccurrenceCheck, SESSION_COOKIE_MAX_AGE,
    SESSION_COOKIE_SECURE, SessionError, SessionStatus, SessionStore, TOKEN_MAX_ATTEMPTS,
    finalize_session, generate_token, get_session_record, get_session_token, have_session,
    initialize_session, is_this_my_session,
};

pub use utils::{UtilError, gen_random_hex};

mod session;
mod store;
mod token;

pub use session::{
    finalize_session, get_session_record, get_session_token, have_session, initialize_session,
    is_this_my_session,
};
pub use store::{CookieSessionStore, MemorySessionStore};
pub use token::{OccurrenceCheck, generate_token};

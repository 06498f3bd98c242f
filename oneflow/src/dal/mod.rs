//! Generic data access layer
//!
//! A fixed set of CRUD operations over arbitrary tables. Table and column
//! names travel as validated [`Identifier`]s and are spliced into the SQL
//! text; values are always bound as parameters.

mod config;
mod connection;
mod errors;
mod operations;
mod query;
mod storage;
mod types;

pub use config::{DB_BACKEND, DB_DEFAULT_PORT, DB_TIMEOUT};
pub use connection::Database;
pub use errors::DalError;
pub use types::{
    Backend, CastMode, ColumnValues, Columns, ConnectionParams, Identifier, Ordering, Record,
    SortDirection,
};

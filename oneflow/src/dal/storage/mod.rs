mod mysql;
mod sqlite;

pub(super) use mysql::{connect_mysql, execute_mysql, fetch_all_mysql, fetch_optional_mysql};
pub(super) use sqlite::{connect_sqlite, execute_sqlite, fetch_all_sqlite, fetch_optional_sqlite};

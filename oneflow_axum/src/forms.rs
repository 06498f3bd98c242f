//! POST form bodies accepted by the handlers
//!
//! Every field defaults to empty so that a missing parameter becomes a
//! validation error from the library instead of an extractor rejection.
//! List parameters accept both `name[]` and repeated `name` keys.

use oneflow::{
    Backend, CastMode, ColumnValues, Columns, ConnectionParams, DalError, Database, Identifier,
    Ordering,
};
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct ConnectionForm {
    pub host: String,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub port: String,
}

impl ConnectionForm {
    pub(crate) fn database(&self, backend: Backend) -> Result<Database, DalError> {
        if self.db_name.trim().is_empty() {
            return Err(DalError::Validation("db_name is required".to_string()));
        }
        let mut params = ConnectionParams::new(
            self.host.trim(),
            self.user.as_str(),
            self.password.as_str(),
            self.db_name.trim(),
        )
        .with_backend(backend);
        if backend == Backend::MySql && params.host.is_empty() {
            return Err(DalError::Validation("host is required".to_string()));
        }
        if !self.port.trim().is_empty() {
            let port = self
                .port
                .trim()
                .parse()
                .map_err(|_| DalError::Validation(format!("Invalid port: {}", self.port)))?;
            params = params.with_port(port);
        }
        Ok(Database::new(params))
    }
}

fn flag(raw: &str) -> bool {
    raw == "true"
}

fn or_default<'a>(raw: &'a str, default: &'a str) -> &'a str {
    if raw.trim().is_empty() { default } else { raw.trim() }
}

fn ordering(column: &str, direction: &str) -> Result<Ordering, DalError> {
    Ok(Ordering::new(Identifier::parse(column)?, direction.parse()?))
}

fn cast_mode(casting_integer: &str, casting_date: &str) -> CastMode {
    if flag(casting_integer) {
        CastMode::Numeric
    } else if flag(casting_date) {
        CastMode::Date
    } else {
        CastMode::Plain
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct SelectAllForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    pub order_by: String,
    pub sorting_by: String,
    pub casting_integer: String,
    pub casting_date: String,
    #[serde(rename = "set_columns[]", alias = "set_columns")]
    pub set_columns: Vec<String>,
}

impl SelectAllForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        Ok(ordering(
            or_default(&self.order_by, "ID"),
            or_default(&self.sorting_by, "ASC"),
        )?
        .with_cast(cast_mode(&self.casting_integer, &self.casting_date)))
    }

    pub(crate) fn columns(&self) -> Result<Columns, DalError> {
        Columns::parse(&self.set_columns)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct SelectTwoColumnsForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    pub column1: String,
    pub value1: String,
    pub column2: String,
    pub value2: String,
    pub order_by: String,
    pub sorting_by: String,
    pub casting_integer: String,
    pub casting_date: String,
    #[serde(rename = "set_columns[]", alias = "set_columns")]
    pub set_columns: Vec<String>,
}

impl SelectTwoColumnsForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        Ok(ordering(
            or_default(&self.order_by, "ID"),
            or_default(&self.sorting_by, "ASC"),
        )?
        .with_cast(cast_mode(&self.casting_integer, &self.casting_date)))
    }

    pub(crate) fn columns(&self) -> Result<Columns, DalError> {
        Columns::parse(&self.set_columns)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct SelectOneWhereForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    pub column: String,
    pub singular_value: String,
    pub order_column: String,
    pub asc_or_desc: String,
}

impl SelectOneWhereForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        ordering(
            or_default(&self.order_column, "ID"),
            or_default(&self.asc_or_desc, "DESC"),
        )
    }
}

/// Parallel `columns[]`/`values[]` lists, used by insert, delete and the
/// exact-match search.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct ColumnValuesForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    #[serde(rename = "columns[]", alias = "columns")]
    pub columns: Vec<String>,
    #[serde(rename = "values[]", alias = "values")]
    pub values: Vec<String>,
}

impl ColumnValuesForm {
    pub(crate) fn column_values(&self) -> Result<ColumnValues, DalError> {
        ColumnValues::new(self.columns.clone(), self.values.clone())
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct UpdateForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    pub pk_column: String,
    pub pk_value: String,
    pub update_column: String,
    pub update_value: String,
    pub column_order: String,
    pub asc_or_desc: String,
}

impl UpdateForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        ordering(
            or_default(&self.column_order, &self.pk_column),
            or_default(&self.asc_or_desc, "DESC"),
        )
    }
}

/// Column lookup shared by `exists` and token generation.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct OccurrenceForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub table: String,
    pub column: String,
    pub value: String,
    pub column_order: String,
    pub asc_or_desc: String,
}

impl OccurrenceForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        ordering(
            or_default(&self.column_order, "ID"),
            or_default(&self.asc_or_desc, "DESC"),
        )
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct SessionNameForm {
    pub name_session: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct InitializeSessionForm {
    pub token: String,
    pub name_session: String,
}

/// Session check against a table column; also used to fetch the session's row.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct SessionCheckForm {
    #[serde(flatten)]
    pub conn: ConnectionForm,
    pub session_name: String,
    pub table: String,
    pub column: String,
    pub column_order: String,
    pub asc_or_desc: String,
}

impl SessionCheckForm {
    pub(crate) fn ordering(&self) -> Result<Ordering, DalError> {
        ordering(
            or_default(&self.column_order, "ID"),
            or_default(&self.asc_or_desc, "DESC"),
        )
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::{DB_BACKEND, DB_DEFAULT_PORT};
use super::errors::DalError;

/// A row as returned by the database: column name to scalar value.
pub type Record = serde_json::Map<String, serde_json::Value>;

const MAX_IDENTIFIER_LEN: usize = 64;

/// A table or column name that is safe to splice into SQL text.
///
/// The only way to obtain one is through [`Identifier::parse`], which accepts
/// `[A-Za-z0-9_]{1,64}` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self, DalError> {
        if raw.is_empty() {
            return Err(DalError::Validation("Identifier must not be empty".to_string()));
        }
        if raw.len() > MAX_IDENTIFIER_LEN {
            return Err(DalError::Validation(format!(
                "Identifier longer than {MAX_IDENTIFIER_LEN} characters"
            )));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(DalError::Validation(format!(
                "Identifier contains forbidden character {bad:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backtick-quoted form, understood by both MySQL and SQLite.
    pub(crate) fn quoted(&self) -> String {
        format!("`{}`", self.0)
    }
}

impl FromStr for Identifier {
    type Err = DalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub(crate) fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(DalError::Validation(format!(
                "Sort direction must be ASC or DESC, got {s:?}"
            ))),
        }
    }
}

/// How the order column is interpreted for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastMode {
    #[default]
    Plain,
    Numeric,
    /// Text column holding `dd/mm/yyyy`.
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: Identifier,
    pub direction: SortDirection,
    pub cast: CastMode,
}

impl Ordering {
    pub fn new(column: Identifier, direction: SortDirection) -> Self {
        Self {
            column,
            direction,
            cast: CastMode::Plain,
        }
    }

    pub fn with_cast(mut self, cast: CastMode) -> Self {
        self.cast = cast;
        self
    }
}

/// Columns to project in a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Columns {
    #[default]
    All,
    List(Vec<Identifier>),
}

impl Columns {
    /// Parses caller-supplied names; an empty list selects every column.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, DalError> {
        if names.is_empty() {
            return Ok(Columns::All);
        }
        let list = names
            .iter()
            .map(|n| Identifier::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Columns::List(list))
    }
}

/// Parallel column/value lists used by insert and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValues {
    columns: Vec<Identifier>,
    values: Vec<String>,
}

impl ColumnValues {
    pub fn single(column: &str, value: impl Into<String>) -> Result<Self, DalError> {
        Ok(Self {
            columns: vec![Identifier::parse(column)?],
            values: vec![value.into()],
        })
    }

    pub fn new<C: AsRef<str>, V: Into<String>>(
        columns: Vec<C>,
        values: Vec<V>,
    ) -> Result<Self, DalError> {
        if columns.is_empty() || values.is_empty() {
            return Err(DalError::Validation(
                "Columns and values must not be empty".to_string(),
            ));
        }
        if columns.len() != values.len() {
            return Err(DalError::Validation(format!(
                "Got {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        let columns = columns
            .iter()
            .map(|c| Identifier::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            columns,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl FromStr for Backend {
    type Err = DalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Backend::MySql),
            "sqlite" => Ok(Backend::Sqlite),
            t => Err(DalError::Validation(format!(
                "Unsupported store type: {t}. Supported types are 'mysql' and 'sqlite'"
            ))),
        }
    }
}

/// Where to connect. Supplied per request; nothing here is cached.
///
/// For SQLite, `db_name` is the database file path.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub backend: Backend,
    pub host: String,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub port: u16,
}

impl ConnectionParams {
    /// Parameters for the configured backend and default port.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        db_name: impl Into<String>,
    ) -> Self {
        Self {
            backend: *DB_BACKEND,
            host: host.into(),
            user: user.into(),
            password: password.into(),
            db_name: db_name.into(),
            port: *DB_DEFAULT_PORT,
        }
    }

    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: Backend::Sqlite,
            host: String::new(),
            user: String::new(),
            password: String::new(),
            db_name: path.into(),
            port: 0,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

// Keeps the password out of logs and error reports.
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("db_name", &self.db_name)
            .field("port", &self.port)
            .finish()
    }
}

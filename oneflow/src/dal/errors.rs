use thiserror::Error;

use crate::ErrorKind;

#[derive(Debug, Error, Clone)]
pub enum DalError {
    /// Opening the connection failed. Driver detail is logged, never carried.
    #[error("Could not connect to database '{database}' on '{host}'")]
    ConnectionFailed { host: String, database: String },

    #[error("Database '{database}' on '{host}' did not answer in time")]
    Timeout { host: String, database: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No matching row")]
    NotFound,

    /// Statement execution failed; the message is for logs only.
    #[error("Query error: {0}")]
    Query(String),
}

impl DalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DalError::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            DalError::Timeout { .. } => ErrorKind::Timeout,
            DalError::Validation(_) => ErrorKind::Validation,
            DalError::NotFound => ErrorKind::NotFound,
            DalError::Query(_) => ErrorKind::QueryFailed,
        }
    }

    /// Message that may be shown to an external caller.
    pub fn public_message(&self) -> String {
        match self {
            DalError::Validation(msg) => msg.clone(),
            DalError::Query(_) => self.kind().default_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for DalError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Query failed: {}", err);
        Self::Query(err.to_string())
    }
}

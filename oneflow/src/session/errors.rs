use thiserror::Error;

use crate::ErrorKind;
use crate::dal::DalError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No session")]
    NoSession,

    #[error("No unique token after {attempts} attempts")]
    TokenCollisionExhausted { attempts: usize },

    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Error from the data access layer
    #[error("Data access error: {0}")]
    Dal(#[from] DalError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) | SessionError::Cookie(_) => ErrorKind::Validation,
            SessionError::NoSession => ErrorKind::NoSession,
            SessionError::TokenCollisionExhausted { .. } => ErrorKind::TokenCollisionExhausted,
            SessionError::Dal(e) => e.kind(),
            SessionError::Utils(_) => ErrorKind::Internal,
        }
    }

    /// Message that may be shown to an external caller.
    pub fn public_message(&self) -> String {
        match self {
            SessionError::Validation(msg) | SessionError::Cookie(msg) => msg.clone(),
            SessionError::Dal(e) => e.public_message(),
            SessionError::Utils(_) => self.kind().default_message().to_string(),
            other => other.to_string(),
        }
    }
}

use http::StatusCode;
use oneflow::{DalError, ErrorKind, SessionError};

/// A failure ready to be rendered on either mount.
///
/// Carries only the stable kind and the caller-safe message; driver text
/// never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            kind,
            message: message.into(),
        }
    }
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NoSession => StatusCode::UNAUTHORIZED,
        ErrorKind::ConnectionFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::TokenCollisionExhausted => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::QueryFailed | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Helper trait for converting library errors to [`ApiError`]
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ApiError>;
}

impl<T> IntoResponseError<T> for Result<T, DalError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::debug!("Data access error: {}", e);
            ApiError::new(e.kind(), e.public_message())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::debug!("Session error: {}", e);
            ApiError::new(e.kind(), e.public_message())
        })
    }
}

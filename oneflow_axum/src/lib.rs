//! oneflow-axum - HTTP glue for the oneflow data access layer and sessions
//!
//! Thin axum handlers that turn POST form bodies into library calls. Each
//! operation is served on a legacy mount, which keeps the plain text bodies
//! the existing front end parses, and on an API mount answering with a JSON
//! envelope and meaningful status codes.

mod config;
mod dal;
mod error;
mod forms;
mod reply;
mod router;
mod session;

pub use config::ONEFLOW_ROUTE_PREFIX;
pub use error::{ApiError, IntoResponseError};
pub use router::{oneflow_router, oneflow_router_with_backend};

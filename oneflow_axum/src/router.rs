//! Combined router for the data access and session endpoints

use axum::Router;
use oneflow::{Backend, DB_BACKEND};

use crate::reply::Mount;

/// Shared by every handler of one mount.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RouteState {
    pub(crate) mount: Mount,
    pub(crate) backend: Backend,
}

/// Create a router exposing every operation twice
///
/// The endpoints will be available at:
/// - {ONEFLOW_ROUTE_PREFIX}/legacy/<route>: plain bodies, always HTTP 200
/// - {ONEFLOW_ROUTE_PREFIX}/api/<route>: JSON envelope with status codes
///
/// Connections use the backend named by `ONEFLOW_DB_TYPE`.
/// Mount it with `Router::new().nest(&ONEFLOW_ROUTE_PREFIX, oneflow_router())`.
pub fn oneflow_router() -> Router {
    oneflow_router_with_backend(*DB_BACKEND)
}

/// Same routes as [`oneflow_router`], connecting to `backend` regardless of
/// `ONEFLOW_DB_TYPE`.
pub fn oneflow_router_with_backend(backend: Backend) -> Router {
    Router::new()
        .nest("/legacy", mounted(Mount::Legacy, backend))
        .nest("/api", mounted(Mount::Api, backend))
}

fn mounted(mount: Mount, backend: Backend) -> Router {
    Router::new()
        .merge(super::dal::router())
        .merge(super::session::router())
        .with_state(RouteState { mount, backend })
}

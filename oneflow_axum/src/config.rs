//! Configuration for the HTTP glue

use std::sync::LazyLock;

/// Mount point of the router.
/// Default: "/oneflow"
pub static ONEFLOW_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| route_prefix(std::env::var("ONEFLOW_ROUTE_PREFIX").ok()));

fn route_prefix(raw: Option<String>) -> String {
    let prefix = raw.unwrap_or_else(|| "/oneflow".to_string());
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        // axum cannot nest a router at the root
        "/oneflow".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

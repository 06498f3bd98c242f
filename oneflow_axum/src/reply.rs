use axum::response::{IntoResponse, Json, Response};
use http::HeaderMap;
use serde_json::{Value, json};

use crate::error::ApiError;

/// Response contract spoken by a mounted router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mount {
    /// Plain bodies the existing front end parses; always HTTP 200.
    Legacy,
    /// `{"ok": ..}` envelope with status codes per error kind.
    Api,
}

enum LegacyBody {
    Text(String),
    Json(Value),
}

/// Successful outcome of a handler, renderable on either mount.
pub(crate) struct Reply {
    legacy: LegacyBody,
    data: Value,
    headers: HeaderMap,
}

impl Reply {
    /// Legacy mount answers with `legacy` as plain text.
    pub(crate) fn text(legacy: impl Into<String>, data: Value) -> Self {
        Self {
            legacy: LegacyBody::Text(legacy.into()),
            data,
            headers: HeaderMap::new(),
        }
    }

    /// Both mounts carry the same JSON document.
    pub(crate) fn json(data: Value) -> Self {
        Self {
            legacy: LegacyBody::Json(data.clone()),
            data,
            headers: HeaderMap::new(),
        }
    }

    pub(crate) fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

impl Mount {
    /// `fallback` is the legacy body sent for any error.
    pub(crate) fn render(self, result: Result<Reply, ApiError>, fallback: &'static str) -> Response {
        match (self, result) {
            (Mount::Legacy, Ok(reply)) => match reply.legacy {
                LegacyBody::Text(text) => (reply.headers, text).into_response(),
                LegacyBody::Json(value) => (reply.headers, Json(value)).into_response(),
            },
            (Mount::Legacy, Err(e)) => {
                tracing::debug!("Legacy response collapsed {:?} to {:?}", e.kind, fallback);
                fallback.into_response()
            }
            (Mount::Api, Ok(reply)) => {
                (reply.headers, Json(json!({ "ok": true, "data": reply.data }))).into_response()
            }
            (Mount::Api, Err(e)) => (
                e.status,
                Json(json!({
                    "ok": false,
                    "error": { "kind": e.kind, "message": e.message }
                })),
            )
                .into_response(),
        }
    }
}

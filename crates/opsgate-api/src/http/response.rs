//! Success response format.
//!
//! Every successful admin response is a flat JSON object with `"ok": true`
//! followed by the payload's own fields:
//! ```json
//! { "ok": true, "name": "seed", "ref": "main", "dispatchedAt": "..." }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{ok: true, ...payload}` with a configurable status code (200 by default).
#[derive(Debug, Serialize)]
pub struct OkResponse<T: Serialize> {
    ok: bool,
    #[serde(flatten)]
    payload: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(payload: T) -> Self {
        Self {
            ok: true,
            payload,
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for OkResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, axum::Json(self)).into_response()
    }
}

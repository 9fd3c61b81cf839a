//! JSON envelopes for API responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use soil_common::SoilError;

#[derive(Serialize)]
struct OkEnvelope<T: Serialize> {
    ok: bool,
    #[serde(flatten)]
    data: T,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    ok: bool,
    error: String,
    kind: &'a str,
}

/// `{"ok": true, ...data}` with status 200.
pub fn ok_response<T: Serialize>(data: T) -> Response {
    json_response(StatusCode::OK, &OkEnvelope { ok: true, data })
}

/// A [`SoilError`] rendered as `{"ok": false, "error", "kind"}`.
#[derive(Debug)]
pub struct ApiError(pub SoilError);

impl From<SoilError> for ApiError {
    fn from(err: SoilError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorEnvelope {
            ok: false,
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        json_response(status, &body)
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (status, [(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "application/json")],
            format!(r#"{{"ok":false,"error":"serialization failed: {}","kind":"internal"}}"#, e),
        )
            .into_response(),
    }
}

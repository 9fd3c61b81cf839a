//! Error types for the soil-moisture services.

use thiserror::Error;

/// Result type alias using SoilError.
pub type SoilResult<T> = Result<T, SoilError>;

/// Maximum number of characters of an upstream response body carried in errors.
pub const UPSTREAM_EXCERPT_LEN: usize = 200;

/// Primary error type surfaced to callers of a soil-moisture query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SoilError {
    // === Request Errors ===
    #[error("{0}")]
    InvalidInput(String),

    // === Authentication Errors ===
    #[error("Earthdata credentials missing. Set EARTHDATA_USER and EARTHDATA_PASS.")]
    AuthMissing,

    #[error("Earthdata auth failed. Check EARTHDATA_USER/PASS.")]
    AuthFailed,

    // === Data Errors ===
    #[error("No SMAP granule found for {0} (try a nearby date).")]
    NotFound(String),

    #[error("Unable to read soil moisture from granule: {0}")]
    SampleUnavailable(String),

    #[error("Unsupported coordinate grid: {0}")]
    GridShape(String),

    // === Upstream Errors ===
    #[error("{}", upstream_message(.status, .message))]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

fn upstream_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("SMAP HTTP error: {} {}", code, message),
        None => format!("SMAP upstream error: {}", message),
    }
}

impl SoilError {
    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an Upstream error for a non-success HTTP response.
    ///
    /// The body is truncated to [`UPSTREAM_EXCERPT_LEN`] characters.
    pub fn upstream_status(status: u16, body: &str) -> Self {
        Self::Upstream {
            status: Some(status),
            message: excerpt(body, UPSTREAM_EXCERPT_LEN),
        }
    }

    /// Create an Upstream error for a failure without an HTTP status.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: msg.into(),
        }
    }

    /// Stable machine-readable kind for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            SoilError::InvalidInput(_) => "invalid_input",
            SoilError::AuthMissing => "auth_missing",
            SoilError::AuthFailed => "auth_failed",
            SoilError::NotFound(_) => "not_found",
            SoilError::SampleUnavailable(_) => "sample_unavailable",
            SoilError::GridShape(_) => "grid_shape",
            SoilError::Upstream { .. } => "upstream",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            SoilError::InvalidInput(_) => 422,

            SoilError::AuthMissing | SoilError::AuthFailed => 401,

            SoilError::NotFound(_) => 404,

            SoilError::Upstream { .. } => 502,

            SoilError::SampleUnavailable(_) | SoilError::GridShape(_) => 500,
        }
    }
}

/// Truncate `body` to at most `max_chars` characters, respecting char boundaries.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SoilError::invalid_input("bad").http_status_code(), 422);
        assert_eq!(SoilError::AuthMissing.http_status_code(), 401);
        assert_eq!(SoilError::AuthFailed.http_status_code(), 401);
        assert_eq!(SoilError::NotFound("2024-06-01".into()).http_status_code(), 404);
        assert_eq!(SoilError::upstream_status(503, "down").http_status_code(), 502);
        assert_eq!(SoilError::SampleUnavailable("x".into()).http_status_code(), 500);
        assert_eq!(SoilError::GridShape("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_auth_kinds_are_distinct() {
        assert_ne!(SoilError::AuthMissing.kind(), SoilError::AuthFailed.kind());
    }

    #[test]
    fn test_upstream_body_is_bounded() {
        let body = "x".repeat(1000);
        match SoilError::upstream_status(500, &body) {
            SoilError::Upstream { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message.len(), UPSTREAM_EXCERPT_LEN);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_excerpt_multibyte() {
        // 'é' is two bytes; slicing by bytes would panic mid-character
        let body = "é".repeat(10);
        assert_eq!(excerpt(&body, 3), "ééé");
        assert_eq!(excerpt("short", 200), "short");
    }

    #[test]
    fn test_upstream_message_format() {
        let err = SoilError::upstream_status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "SMAP HTTP error: 503 Service Unavailable");

        let err = SoilError::upstream("connection reset");
        assert_eq!(err.to_string(), "SMAP upstream error: connection reset");
    }
}

//! Error types and error handling
//!
//! Every failure inside a request handler ends up as a [`ViewerError`]. The
//! response surface is deliberately flat: whatever went wrong, the client gets
//! `500 Internal Server Error` with a `{"error": "<message>"}` JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Viewer error type
#[derive(Debug, Error)]
pub enum ViewerError {
    /// A file or directory could not be read or listed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Random selection over an empty collection
    #[error("Nothing to select: {0}")]
    Selection(String),

    /// Missing or invalid request parameters
    #[error("Bad request: {0}")]
    Usage(String),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ViewerError {
    /// Wrap an I/O error together with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a missing query parameter
    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::Usage(format!("missing required query parameter `{name}`"))
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_display_includes_path() {
        let err = ViewerError::io(
            "html/cards/missing.html",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to read html/cards/missing.html: no such file"
        );
    }

    #[test]
    fn test_missing_param_message() {
        let err = ViewerError::missing_param("category");
        assert_eq!(
            err.to_string(),
            "Bad request: missing required query parameter `category`"
        );
    }

    #[tokio::test]
    async fn test_every_variant_is_a_500_with_json_body() {
        let errors = vec![
            ViewerError::Selection("no top categories".to_string()),
            ViewerError::missing_param("id"),
            ViewerError::io("x", std::io::Error::other("boom")),
            ViewerError::Config("bad port".to_string()),
        ];

        for err in errors {
            let expected = err.to_string();
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["error"], expected);
        }
    }
}

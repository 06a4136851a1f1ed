//! Viewer chrome assets compiled into the binary

use axum::{http::header, response::IntoResponse};

/// Mount point of the embedded assets
pub const PREFIX: &str = "/__viewer";

const SCRIPT: &str = include_str!("../../assets/js/main.js");
const STYLESHEET: &str = include_str!("../../assets/css/viewer.css");

/// `GET /__viewer/js/main.js`
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
}

/// `GET /__viewer/css/viewer.css`
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

//! Integration tests for the viewer routes
//!
//! Drives the full router in-process against a temporary pack.

use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{Request, StatusCode};
use packs_viewer::prelude::*;
use serde_json::Value;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use tower::ServiceExt;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Helper to create a test app over a small pack
fn test_app() -> (TempDir, Router) {
    let temp = TempDir::new().unwrap();
    let html = temp.path().join("html");
    write(&html, "navigation/nav1.html", "<nav>nav one</nav>");
    write(&html, "cards/card1.html", "<div class=\"card\">card one</div>");
    write(&html, "cards/card2.html", "<div class=\"card\">card two</div>");
    write(&html, "footer/foot1.html", "<footer>foot one</footer>");
    write(&html, "__partials/base.html", "<html></html>");
    write(temp.path(), "static/css/pack.css", "body { margin: 0 }");

    let mut config = ViewerConfig::for_content_dir(&html);
    config.static_dir = temp.path().join("static");

    let server = PreviewServer::with_random(config, Arc::new(SequenceRandom::first())).unwrap();
    let router = server.router();
    (temp, router)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn error_message(body: &str) -> String {
    let json: Value = serde_json::from_str(body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_index_defaults_to_first_category() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Cards | Packs</title>"));
    assert!(body.contains("card one"));
    assert!(body.contains("card two"));
    assert!(!body.contains("nav one"));
}

#[tokio::test]
async fn test_index_lists_navigable_categories() {
    let (_temp, app) = test_app();
    let (_, body) = get(app, "/").await;

    for category in ["cards", "footer", "navigation"] {
        assert!(body.contains(&format!("data-shuffle-category=\"{category}\"")));
    }
    assert!(!body.contains("data-shuffle-category=\"__partials\""));
}

#[tokio::test]
async fn test_index_selected_category() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/?category=footer").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Footer"));
    assert!(body.contains("<footer>foot one</footer>"));
    assert!(!body.contains("card one"));
}

#[tokio::test]
async fn test_index_unknown_category_is_empty() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/?category=pricing").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No components in this category."));
}

#[tokio::test]
async fn test_index_without_categories_is_500() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("html")).unwrap();
    let server = PreviewServer::new(ViewerConfig::for_content_dir(temp.path().join("html"))).unwrap();

    let (status, body) = get(server.router(), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("no component categories"));
}

#[tokio::test]
async fn test_component_renders_raw_markup() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/component?id=cards/card1.html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div class=\"card\">card one</div>"));
    assert!(body.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_component_missing_file_is_500_json() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/component?id=cards/missing.html").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("missing.html"));
}

#[tokio::test]
async fn test_component_without_id_is_500() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/component").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("`id`"));
}

#[tokio::test]
async fn test_component_outside_root_is_rejected() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/component?id=../static/css/pack.css").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("inside the content directory"));
}

#[tokio::test]
async fn test_page_composes_in_bucket_order() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/page?category=cards&component=card2.html").await;

    assert_eq!(status, StatusCode::OK);
    let position = |id: &str| {
        body.find(&format!("data-component-id=\"{id}\""))
            .unwrap_or_else(|| panic!("{id} missing from page"))
    };
    assert!(position("nav1") < position("card2"));
    assert!(position("card2") < position("card1"));
    assert!(position("card1") < position("foot1"));
}

#[tokio::test]
async fn test_page_for_footer_ends_with_it() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/page?category=footer&component=foot1.html").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-component-id=").count(), 3);
    let nav = body.find("data-component-id=\"nav1\"").unwrap();
    let card = body.find("data-component-id=\"card1\"").unwrap();
    let foot = body.find("data-component-id=\"foot1\"").unwrap();
    assert!(nav < card && card < foot);
}

#[tokio::test]
async fn test_page_without_params_is_500() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/page?category=cards").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("`component`"));
}

#[tokio::test]
async fn test_page_blank_category_counts_as_missing() {
    let (_temp, app) = test_app();
    let (status, body) = get(app, "/page?category=%20&component=card1.html").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("`category`"));
}

#[tokio::test]
async fn test_index_survives_badly_encoded_snippet() {
    let (temp, app) = test_app();
    std::fs::write(temp.path().join("html/cards/latin1.html"), b"<p>caf\xe9</p>").unwrap();

    let (status, body) = get(app, "/?category=cards").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>caf\u{fffd}</p>"));
}

#[tokio::test]
async fn test_static_files_fall_back_to_static_dir() {
    let (_temp, app) = test_app();

    let (status, body) = get(app.clone(), "/css/pack.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { margin: 0 }");

    let (status, _) = get(app, "/img/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_viewer_assets_are_served() {
    let (_temp, app) = test_app();

    let (status, _) = get(app.clone(), "/__viewer/js/main.js").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(app, "/__viewer/css/viewer.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".shuffle-"));
}

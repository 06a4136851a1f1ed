//! End-to-end tests through `axum-test`
//!
//! Covers behavior that depends on the server wiring: random source
//! injection, compression and edits to the pack between requests.

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use packs_viewer::prelude::*;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn pack() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "headers/header1.html", "<header>h1</header>");
    write(temp.path(), "navigation/nav1.html", "<nav>n1</nav>");
    write(temp.path(), "cards/card1.html", "<div>c1</div>");
    write(temp.path(), "pricing/price1.html", "<div>p1</div>");
    write(temp.path(), "pricing/price2.html", "<div>p2</div>");
    write(temp.path(), "footer/foot1.html", "<footer>f1</footer>");
    temp
}

fn test_server(root: &Path, random: SequenceRandom) -> TestServer {
    let server = PreviewServer::with_random(ViewerConfig::for_content_dir(root), Arc::new(random))
        .unwrap();
    TestServer::new(server.router()).unwrap()
}

#[tokio::test]
async fn test_injected_random_source_drives_companions() {
    let temp = pack();
    // top: [headers, navigation] -> navigation, nav1
    // mid: [cards, pricing]      -> pricing, price2
    // bottom: [footer]           -> footer, foot1
    let server = test_server(temp.path(), SequenceRandom::new([1, 0, 1, 1, 0, 0]));

    let response = server
        .get("/page")
        .add_query_param("category", "cards")
        .add_query_param("component", "card1.html")
        .await;

    response.assert_status_ok();
    let body = response.text();
    let order: Vec<usize> = ["nav1", "card1", "price2", "foot1"]
        .iter()
        .map(|id| body.find(&format!("data-component-id=\"{id}\"")).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(!body.contains("header1"));
}

#[tokio::test]
async fn test_empty_bucket_is_reported_as_json() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "cards/card1.html", "<div>c1</div>");
    let server = test_server(temp.path(), SequenceRandom::first());

    let response = server
        .get("/page")
        .add_query_param("category", "cards")
        .add_query_param("component", "card1.html")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert!(json["error"].as_str().unwrap().contains("top categories"));
}

#[tokio::test]
async fn test_pack_edits_show_up_without_restart() {
    let temp = pack();
    let server = test_server(temp.path(), SequenceRandom::first());

    let before = server.get("/").add_query_param("category", "cards").await.text();
    assert!(!before.contains("card2"));

    write(temp.path(), "cards/card2.html", "<div>c2</div>");
    let after = server.get("/").add_query_param("category", "cards").await.text();
    assert!(after.contains("<div>c2</div>"));
}

#[tokio::test]
async fn test_responses_are_compressed_on_request() {
    let temp = pack();
    let server = test_server(temp.path(), SequenceRandom::first());

    let response = server
        .get("/")
        .add_header(header::ACCEPT_ENCODING, "gzip")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_ENCODING), "gzip");
}

use super::*;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

const MENU_BODY: &str = r#"{
    "Mains": [
        { "name": "Burger", "desc": "Beef", "price": 12, "currency": "USD",
          "model": { "glb": "/models/burger.glb", "usdz": "/models/burger.usdz" } }
    ],
    "Drinks": [
        { "name": "Lemonade", "desc": "Fresh", "price": 3.5, "currency": "USD" }
    ]
}"#;

async fn spawn_menu_server(status: StatusCode, body: &'static str) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/menu.json", get(move || async move { (status, body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetches_category_mapping_over_http() {
    let server_url = spawn_menu_server(StatusCode::OK, MENU_BODY).await;
    let source = HttpCatalogSource::new(&server_url).expect("source");
    assert_eq!(source.menu_url().path(), "/menu.json");

    let catalog = source.fetch_catalog().await.expect("catalog");
    let names: Vec<&str> = catalog.category_names().collect();
    assert_eq!(names, vec!["Mains", "Drinks"]);
    assert_eq!(catalog.item_count(), 2);
}

#[tokio::test]
async fn menu_url_is_resolved_from_server_root() {
    let source = HttpCatalogSource::new("http://menu.test/app/index.html").expect("source");
    assert_eq!(source.menu_url().as_str(), "http://menu.test/menu.json");
    assert!(matches!(
        HttpCatalogSource::new("not a url"),
        Err(CatalogFetchError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn server_error_is_reported_as_status() {
    let server_url = spawn_menu_server(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let source = HttpCatalogSource::new(&server_url).expect("source");

    let err = source.fetch_catalog().await.expect_err("500");
    assert!(matches!(err, CatalogFetchError::Status { status: 500 }));
}

#[tokio::test]
async fn malformed_document_is_reported() {
    let server_url = spawn_menu_server(StatusCode::OK, "{ \"Mains\": [ { ").await;
    let source = HttpCatalogSource::new(&server_url).expect("source");

    let err = source.fetch_catalog().await.expect_err("malformed");
    assert!(matches!(err, CatalogFetchError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let source = HttpCatalogSource::new(&format!("http://{addr}")).expect("source");
    let err = source.fetch_catalog().await.expect_err("refused");
    assert!(matches!(err, CatalogFetchError::Network(_)));
}

#[tokio::test]
async fn reads_menu_document_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("menu_loader_test_{suffix}.json"));
    std::fs::write(&path, MENU_BODY).expect("write");

    let catalog = FileCatalogSource::new(&path)
        .fetch_catalog()
        .await
        .expect("catalog");
    assert_eq!(catalog.categories().len(), 2);

    std::fs::remove_file(&path).expect("cleanup");

    let missing = FileCatalogSource::new(&path).fetch_catalog().await;
    assert!(matches!(missing, Err(CatalogFetchError::Io { .. })));
}

//! Runs the HTTP listing client against a stand-in Infinity API served on a
//! local port.

use std::time::Duration;

use axum::{extract::Path, routing::get, Json, Router};
use common::config::BackendConfig;
use common::errors::AppError;
use dashboard::backend::{HttpListingBackend, ListingBackend};
use dashboard::page::load_page;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn fake_infinity() -> String {
    let app = Router::new()
        .route(
            "/databases",
            get(|| async { Json(json!({"error_code": 0, "databases": ["default_db", "db2"]})) }),
        )
        .route(
            "/databases/{name}/tables",
            get(|Path(name): Path<String>| async move {
                let body: Value = match name.as_str() {
                    "default_db" => json!({"error_code": 0, "tables": ["t1", "t2"]}),
                    "db2" => json!({"error_code": 0, "tables": ["x"]}),
                    "my db" => json!({"error_code": 0, "tables": ["spaced"]}),
                    other => json!({
                        "error_code": 3021,
                        "error_message": format!("Database: {} doesn't exist.", other)
                    }),
                };
                Json(body)
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> HttpListingBackend {
    HttpListingBackend::new(&BackendConfig {
        base_url,
        default_database: "default_db".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_lists_databases_and_tables() {
    let backend = client(fake_infinity().await);

    let databases = backend.list_databases().await.unwrap();
    assert_eq!(databases.databases, vec!["default_db", "db2"]);

    let tables = backend.list_tables("default_db").await.unwrap();
    assert_eq!(tables.tables, vec!["t1", "t2"]);

    let spaced = backend.list_tables("my db").await.unwrap();
    assert_eq!(spaced.tables, vec!["spaced"]);
}

#[tokio::test]
async fn test_backend_error_code_is_reported() {
    let backend = client(fake_infinity().await);

    match backend.list_tables("missing").await {
        Err(AppError::Backend { code, message }) => {
            assert_eq!(code, 3021);
            assert!(message.contains("missing"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_is_external_error() {
    let app = Router::new().route("/databases", get(|| async { "not json" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let backend = client(format!("http://{}", addr));
    assert!(matches!(
        backend.list_databases().await,
        Err(AppError::ExternalService(_))
    ));
}

#[tokio::test]
async fn test_page_data_over_http() {
    let backend = client(fake_infinity().await);

    let data = load_page(&backend, "default_db").await.unwrap();
    assert_eq!(data.menu.len(), 2);
    assert_eq!(data.menu[1].key, "db2");
    assert_eq!(data.menu[1].children.len(), 1);
    assert_eq!(data.table.tables, vec!["t1", "t2"]);
}

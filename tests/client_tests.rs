//! Tests for the API client and the catalog view against a live server
//!
//! Each test binds the REST router to an ephemeral port on 127.0.0.1 and
//! talks to it over real HTTP.

use axum::{Json, Router, routing::get};
use catalog::config::ClientConfig;
use catalog::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

// =============================================================================
// Fixtures
// =============================================================================

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_catalog() -> String {
    let app = ServerBuilder::new()
        .with_product_service(InMemoryProductService::with_sample_data())
        .build()
        .expect("Failed to build app");
    spawn(app).await
}

/// A port nothing listens on: bind, read the port, release it
async fn unbound_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn client_for(base: &str) -> ApiClient {
    ApiClient::new(&ClientConfig {
        api_base_url: base.to_string(),
        timeout_secs: 2,
    })
    .expect("Failed to build client")
}

fn view_for(base: &str, page_size: usize) -> CatalogView {
    CatalogView::new(
        client_for(base),
        TableView::new(page_size),
        Renderer::new(Layout::Table, Layout::Table.default_preset()),
    )
}

// =============================================================================
// ApiClient
// =============================================================================

mod api_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_products() {
        let base = spawn_catalog().await;
        let products = client_for(&base).fetch_products().await.unwrap();
        assert_eq!(products.len(), 7);
        assert_eq!(products[0].product_name, "Nasi Goreng");
    }

    #[tokio::test]
    async fn test_fetch_product_found() {
        let base = spawn_catalog().await;
        let product = client_for(&base).fetch_product(5).await.unwrap();
        assert_eq!(product.product_name, "Kopi Tubruk");
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found_not_network() {
        let base = spawn_catalog().await;
        let err = client_for(&base).fetch_product(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, FetchError::NotFound { id: 404 }));

        let offline = unbound_base_url().await;
        let err = client_for(&offline).fetch_product(1).await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_search_with_space() {
        let base = spawn_catalog().await;
        let found = client_for(&base).search("teh manis").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id, 4);
    }

    #[tokio::test]
    async fn test_server_error_becomes_status() {
        let app = Router::new().route(
            "/api/products",
            get(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Error fetching data" })),
                )
            }),
        );
        let base = spawn(app).await;

        match client_for(&base).fetch_products().await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Error fetching data");
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_rejected() {
        let app = Router::new().route(
            "/api/products",
            get(|| async { Json(json!({ "success": false, "message": "maintenance" })) }),
        );
        let base = spawn(app).await;

        match client_for(&base).fetch_products().await {
            Err(FetchError::Rejected { message }) => assert_eq!(message, "maintenance"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_numeric_strings_are_accepted() {
        let app = Router::new().route(
            "/api/products",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": [{
                        "product_id": 1,
                        "category_id": 5,
                        "product_name": "Nasi Goreng",
                        "price": "12000.00",
                        "stock": "15",
                        "description": null
                    }],
                    "total": 1
                }))
            }),
        );
        let base = spawn(app).await;

        let products = client_for(&base).fetch_products().await.unwrap();
        assert_eq!(products[0].price, Some(12000.0));
        assert_eq!(products[0].stock, Some(15));
        assert_eq!(products[0].description, None);
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let app = Router::new().route("/api/products", get(|| async { "<html>oops</html>" }));
        let base = spawn(app).await;

        let err = client_for(&base).fetch_products().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let app = Router::new().route(
            "/api/products",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "success": true, "data": [] }))
            }),
        );
        let base = spawn(app).await;
        let client = ApiClient::new(&ClientConfig {
            api_base_url: base,
            timeout_secs: 1,
        })
        .unwrap();

        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout), "got {:?}", err);
    }
}

// =============================================================================
// CatalogView
// =============================================================================

mod catalog_view_tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_loads_records() {
        let base = spawn_catalog().await;
        let view = view_for(&base, 5);

        assert_eq!(view.refresh().await, RefreshOutcome::Refreshed { count: 7 });
        assert_eq!(view.load_state(), LoadState::Ready);

        let stats = view.stats();
        assert_eq!(stats.total, 7);
        assert_eq!(stats.visible, 5);
        assert_eq!(stats.total_pages, 2);
    }

    #[tokio::test]
    async fn test_refresh_resets_view_state() {
        let base = spawn_catalog().await;
        let view = view_for(&base, 2);
        view.refresh().await;

        view.set_search_term("ayam");
        view.toggle_sort(SortKey::Price);
        view.next_page();

        view.refresh().await;
        view.with_table(|table| {
            assert_eq!(table.search_term(), "");
            assert_eq!(table.sort_state(), SortState::default());
            assert_eq!(table.current_page(), 1);
            assert_eq!(table.filtered().len(), 7);
        });
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_records() {
        let base = spawn_catalog().await;
        let online = view_for(&base, 5);
        online.refresh().await;
        let records = online.with_table(|t| t.records().to_vec());

        let offline = CatalogView::new(
            client_for(&unbound_base_url().await),
            TableView::new(5).with_records(records),
            Renderer::new(Layout::Mobile, Layout::Mobile.default_preset()),
        );

        let outcome = offline.refresh().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Failed {
                message: catalog::client::FETCH_FAILED_MESSAGE.to_string()
            }
        );
        assert!(matches!(offline.load_state(), LoadState::Failed { .. }));
        assert_eq!(offline.stats().total, 7);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_is_ignored() {
        let app = Router::new().route(
            "/api/products",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Json(json!({ "success": true, "data": [], "total": 0 }))
            }),
        );
        let base = spawn(app).await;
        let view = view_for(&base, 5);

        // join! polls in order: the first claims the guard before the second runs
        let (first, second) = tokio::join!(view.refresh(), view.refresh());
        assert_eq!(first, RefreshOutcome::Refreshed { count: 0 });
        assert_eq!(second, RefreshOutcome::AlreadyInFlight);

        // the guard is released afterwards
        assert!(!view.fetch_guard().is_in_flight());
        assert_eq!(view.refresh().await, RefreshOutcome::Refreshed { count: 0 });
    }

    #[tokio::test]
    async fn test_product_detail_states() {
        let base = spawn_catalog().await;
        let view = view_for(&base, 5);

        match view.product_detail(2).await {
            DetailState::Found(product) => assert_eq!(product.product_name, "Mie Goreng"),
            other => panic!("expected Found, got {:?}", other),
        }
        assert_eq!(view.product_detail(77).await, DetailState::NotFound { id: 77 });

        let offline = view_for(&unbound_base_url().await, 5);
        assert!(matches!(
            offline.product_detail(2).await,
            DetailState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_export_after_refresh() {
        let base = spawn_catalog().await;
        let view = view_for(&base, 2);
        view.refresh().await;
        view.set_search_term("goreng");

        let dir = tempfile::tempdir().unwrap();
        let path = view.export_csv_to(dir.path()).expect("export should succeed");
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("products_"));
        assert!(file_name.ends_with(".csv"));

        let written = std::fs::read_to_string(&path).unwrap();
        // header + Nasi Goreng + Mie Goreng, regardless of page size
        assert_eq!(written.lines().count(), 3);
    }
}

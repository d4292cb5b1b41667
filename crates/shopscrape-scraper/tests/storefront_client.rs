//! Integration tests for `StorefrontClient` against a local HTTP server.
//!
//! Uses `wiremock` to stand up a server per test so no real network traffic
//! is made. Covers the happy paths (empty, single-page, multi-page), the
//! flattened tables, and every network and parse error the client surfaces.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopscrape_scraper::{ScraperError, StorefrontClient};

/// Builds a `StorefrontClient` suitable for tests: 5-second timeout, descriptive UA.
fn test_client() -> StorefrontClient {
    StorefrontClient::new(5, "shopscrape-test/0.1", 20).expect("failed to build test client")
}

fn product(id: i64, handle: &str, variants: serde_json::Value, images: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "handle": handle,
        "vendor": "Acme",
        "body_html": "<p>Test</p>",
        "tags": [],
        "variants": variants,
        "images": images
    })
}

/// Mounts one listing page at `page` returning `body`, expected exactly once.
async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "250"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_returns_empty_vec_when_first_page_is_empty() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({"products": []})).await;

    let result = test_client().fetch_all_products(&server.uri()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_all_products_walks_pages_until_empty() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"products": [product(1, "one", json!([]), json!([])), product(2, "two", json!([]), json!([]))]}),
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"products": [product(3, "three", json!([]), json!([]))]}),
    )
    .await;
    mount_page(&server, 3, json!({"products": []})).await;

    let products = test_client()
        .fetch_all_products(&format!("{}/", server.uri()))
        .await
        .expect("expected Ok");

    let ids: Vec<i64> = products.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(
        products[2].url.as_deref(),
        Some(format!("{}/products/three", server.uri()).as_str())
    );
    // `expect(1)` on each page is verified when the server drops; page 4 has
    // no mock, so requesting it would fail the test with a 404.
}

#[tokio::test]
async fn fetch_page_sends_user_agent_and_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(header("user-agent", "shopscrape-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"products":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client().fetch_page(&server.uri(), 1).await.unwrap();

    assert_eq!(body, r#"{"products":[]}"#);
}

#[tokio::test]
async fn scrape_catalog_two_product_store() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"products": [
            product(
                10,
                "tonic",
                json!([
                    {"id": 101, "product_id": 10, "title": "Can", "price": "3.00"},
                    {"id": 102, "product_id": "10", "title": "Case", "price": "30.00"}
                ]),
                json!([])
            ),
            product(
                11,
                "seltzer",
                json!([]),
                json!([{"id": 1100, "product_id": 11, "position": 1, "src": "https://cdn.example/1100.jpg"}])
            )
        ]}),
    )
    .await;
    mount_page(&server, 2, json!({"products": []})).await;

    let tables = test_client()
        .scrape_catalog(&format!("{}/", server.uri()))
        .await
        .expect("expected Ok");

    assert_eq!(tables.products.len(), 2);
    assert_eq!(tables.variants.len(), 2);
    assert_eq!(tables.images.len(), 1);
    for row in tables.variants.rows() {
        assert_eq!(row["product_title"], json!("Product 10"));
        assert_eq!(row["vendor"], json!("Acme"));
        assert_eq!(row["product_id"], json!(10));
    }
    assert_eq!(tables.images.rows()[0]["src"], json!("https://cdn.example/1100.jpg"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_propagates_unexpected_status_for_5xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client().fetch_all_products(&server.uri()).await;

    let err = result.unwrap_err();
    assert!(err.is_network(), "expected a network error, got: {err:?}");
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_not_found_as_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client().fetch_all_products(&server.uri()).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_second_page_failure_discards_first_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"products": [product(1, "one", json!([]), json!([]))]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client().fetch_all_products(&server.uri()).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_malformed_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = test_client().fetch_all_products(&server.uri()).await;

    assert!(
        matches!(result, Err(ScraperError::Parse { .. })),
        "expected Parse, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_rejects_body_without_products_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"errors": "Not Found"})))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri())
        .await
        .unwrap_err();

    assert!(err.is_parse(), "expected a parse error, got: {err:?}");
}

#[tokio::test]
async fn fetch_page_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"products": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = StorefrontClient::new(1, "shopscrape-test/0.1", 20).unwrap();
    let err = client.fetch_page(&server.uri(), 1).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::Http { ref source, .. } if source.is_timeout()),
        "expected a timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_connection_refused_is_network_error() {
    // Bind a server to reserve a port, then drop it so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let err = test_client().fetch_all_products(&uri).await.unwrap_err();

    assert!(err.is_network(), "expected a network error, got: {err:?}");
}

#[tokio::test]
async fn fetch_all_products_stops_at_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"products": [product(1, "same", json!([]), json!([]))]})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = StorefrontClient::new(5, "shopscrape-test/0.1", 3).unwrap();
    let result = client.fetch_all_products(&server.uri()).await;

    assert!(
        matches!(result, Err(ScraperError::PaginationLimit { max_pages: 3, .. })),
        "expected PaginationLimit, got: {result:?}"
    );
}

#[tokio::test]
async fn scrape_catalog_surfaces_orphan_variant() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"products": [product(
            10,
            "tonic",
            json!([{"id": 101, "product_id": 999, "title": "Can"}]),
            json!([])
        )]}),
    )
    .await;
    mount_page(&server, 2, json!({"products": []})).await;

    let result = test_client().scrape_catalog(&server.uri()).await;

    assert!(
        matches!(result, Err(ScraperError::JoinIntegrity { matches: 0, .. })),
        "expected JoinIntegrity, got: {result:?}"
    );
}

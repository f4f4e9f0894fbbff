//! Integration tests for cursor-following product pagination.
//!
//! These tests run the paginator against a mock Admin API and verify page
//! ordering, cursor hand-off, and how malformed responses abort the fetch.

use serde_json::{json, Value};
use shopify_catalog_export::clients::{GraphqlClient, SDK_VERSION};
use shopify_catalog_export::export::{ExportError, PagePolicy, Paginator, ProductQuery};
use shopify_catalog_export::{AccessToken, ApiBaseUrl, ExportConfig, ShopDomain};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/admin/api/2024-10/graphql.json";

/// Creates a config pointing at the mock server.
fn create_test_config(server: &MockServer) -> ExportConfig {
    ExportConfig::builder()
        .shop_domain(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// Builds a products page with one edge per id; cursors are `c<id>`.
fn products_page(ids: &[u64], has_next_page: bool) -> Value {
    let edges: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "cursor": format!("c{id}"),
                "node": {"id": format!("gid://shopify/Product/{id}"), "title": format!("Product {id}")}
            })
        })
        .collect();

    json!({
        "data": {"products": {"pageInfo": {"hasNextPage": has_next_page}, "edges": edges}}
    })
}

fn numeric_ids(products: &[shopify_catalog_export::catalog::Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| shopify_catalog_export::catalog::numeric_id(p.id.as_deref()))
        .collect()
}

// ============================================================================
// Page Sequencing
// ============================================================================

#[tokio::test]
async fn test_follows_last_edge_cursor_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(r#"after: \"c3\""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[4, 5], false)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[1, 2, 3], true)))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id title", PagePolicy::All);

    let products = Paginator::new(&client).fetch_products(&query).await.unwrap();

    assert_eq!(numeric_ids(&products), vec!["1", "2", "3", "4", "5"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert!(!first["query"].as_str().unwrap().contains("after:"));
    assert!(second["query"]
        .as_str()
        .unwrap()
        .contains(r#"products(first: 250, after: "c3")"#));
}

#[tokio::test]
async fn test_single_page_issues_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[7], false)))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let products = Paginator::new(&client).fetch_products(&query).await.unwrap();
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_requests_carry_user_agent_prefix() {
    let server = MockServer::start().await;
    let user_agent = format!("CatalogBot/1.0 | Shopify Catalog Export v{SDK_VERSION}");

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("User-Agent", user_agent.as_str()))
        .and(body_string_contains("products(first: 250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[7], false)))
        .expect(1)
        .mount(&server)
        .await;

    let config = ExportConfig::builder()
        .shop_domain(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .user_agent_prefix("CatalogBot/1.0")
        .build()
        .unwrap();
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let products = Paginator::new(&client).fetch_products(&query).await.unwrap();
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_empty_catalog_yields_no_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[], false)))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let products = Paginator::new(&client).fetch_products(&query).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_latest_policy_fetches_one_page_even_when_more_exist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("sortKey: CREATED_AT, reverse: true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[9, 8], true)))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::Latest(50));

    let products = Paginator::new(&client).fetch_products(&query).await.unwrap();
    assert_eq!(numeric_ids(&products), vec!["9", "8"]);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[tokio::test]
async fn test_errors_array_aborts_export() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Access denied for products field."}]
        })))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let error = Paginator::new(&client)
        .fetch_products(&query)
        .await
        .unwrap_err();

    assert!(matches!(error, ExportError::GraphQlErrors { .. }));
    assert!(error.to_string().contains("Access denied"));
}

#[tokio::test]
async fn test_missing_products_aborts_with_bad_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let error = Paginator::new(&client)
        .fetch_products(&query)
        .await
        .unwrap_err();

    assert!(matches!(error, ExportError::BadUpstreamResponse { .. }));
    assert!(error
        .to_string()
        .starts_with("Unexpected response from Shopify GraphQL: "));
}

#[tokio::test]
async fn test_failure_on_later_page_discards_earlier_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(r#"after: \"c2\""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[1, 2], true)))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let result = Paginator::new(&client).fetch_products(&query).await;
    assert!(matches!(result, Err(ExportError::BadUpstreamResponse { .. })));
}

#[tokio::test]
async fn test_next_page_without_cursor_does_not_loop() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(&[], true)))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let result = Paginator::new(&client).fetch_products(&query).await;
    assert!(matches!(result, Err(ExportError::BadUpstreamResponse { .. })));
}

#[tokio::test]
async fn test_http_error_status_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"errors": "[API] Invalid API key or access token"})),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let client = GraphqlClient::new(&config).unwrap();
    let query = ProductQuery::new("id", PagePolicy::All);

    let error = Paginator::new(&client)
        .fetch_products(&query)
        .await
        .unwrap_err();

    assert!(matches!(error, ExportError::Upstream(_)));
    assert_eq!(error.status_code(), 500);
    assert!(error.to_string().contains("Invalid API key"));
}

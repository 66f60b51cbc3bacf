//! Integration tests for the API client against a mock HTTP server.
//!
//! Covers the three response tiers (non-2xx, empty/204, JSON body), the
//! JSON request headers, and percent-encoding of ids and query values.

use bulletin::api::{ApiClient, ApiError, Category, CategoryInput, CategoryUpdate};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    let base = Url::parse(&server.uri()).unwrap();
    ApiClient::new(reqwest::Client::new(), base).unwrap()
}

fn category(id: &str, name: &str, favorite: bool) -> serde_json::Value {
    serde_json::json!({ "id": id, "name": name, "favorite": favorite })
}

// ============================================================================
// List Categories
// ============================================================================

#[tokio::test]
async fn test_list_categories_returns_parsed_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            category("c1", "Rust", true),
            category("c2", "Go", false),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let categories = client.list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, "c1");
    assert!(categories[0].favorite);
    assert_eq!(categories[1].name, "Go");
}

#[tokio::test]
async fn test_list_categories_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_categories_zero_length_body_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_2xx_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_categories().await.unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database exploded");
        }
        other => panic!("expected Status error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_parse_failure_is_distinct_from_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse { .. }), "got: {:?}", err);
}

#[tokio::test]
async fn test_requests_send_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.list_categories().await.unwrap();
    // Mock expectation (exactly one matching request) verified on drop.
}

// ============================================================================
// Single-Category Operations
// ============================================================================

#[tokio::test]
async fn test_get_category_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category("c1", "Rust", false)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let cat = client.get_category("c1").await.unwrap().unwrap();
    assert_eq!(cat.name, "Rust");
}

#[tokio::test]
async fn test_category_id_is_percent_encoded_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category("a b", "Spaced", false)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.get_category("a b").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/categories/a%20b");
}

#[tokio::test]
async fn test_create_category_posts_body() {
    let server = MockServer::start().await;
    let input = CategoryInput {
        name: "New".to_string(),
        favorite: false,
    };
    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(serde_json::json!({"name": "New", "favorite": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(category("c9", "New", false)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let created = client.create_category(&input).await.unwrap().unwrap();
    assert_eq!(created.id, "c9");
}

#[tokio::test]
async fn test_update_category_put_sends_full_record() {
    let server = MockServer::start().await;
    let update = CategoryUpdate {
        id: "c1".to_string(),
        name: "Rust".to_string(),
        favorite: true,
    };
    Mock::given(method("PUT"))
        .and(path("/categories/c1"))
        .and(body_json(serde_json::json!({
            "id": "c1", "name": "Rust", "favorite": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category("c1", "Rust", true)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updated = client.update_category("c1", &update).await.unwrap().unwrap();
    assert!(updated.favorite);
}

#[tokio::test]
async fn test_204_from_mutating_endpoint_resolves_without_parse() {
    let server = MockServer::start().await;
    let update = CategoryUpdate {
        id: "c1".to_string(),
        name: "Rust".to_string(),
        favorite: true,
    };
    Mock::given(method("PUT"))
        .and(path("/categories/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/categories/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.update_category("c1", &update).await.unwrap().is_none());
    assert!(client.delete_category("c1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_category_returns_deleted_record() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/categories/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category("c1", "Rust", false)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let deleted: Option<Category> = client.delete_category("c1").await.unwrap();
    assert_eq!(deleted.unwrap().id, "c1");
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_list_posts_sends_category_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("category", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "p1",
                "description": "First post",
                "date": "2025-04-07T00:00:00Z",
                "categories": ["c1", "c2"]
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let posts = client.list_posts("c1").await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].description, "First post");
    assert_eq!(posts[0].categories, vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_list_posts_500_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_posts("c1").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

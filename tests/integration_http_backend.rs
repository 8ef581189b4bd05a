//! HTTP backend integration tests
//!
//! Runs the catalog loader and widget requests against a local mock server.

use serde_json::json;
use std::time::Duration;
use toolhub::backend::http::HttpOptions;
use toolhub::backend::{Backend, HttpBackend};
use toolhub::catalog::CatalogLoader;
use toolhub::error::ToolhubError;
use toolhub::hub::{Hub, execute};
use toolhub::widgets::{RequestState, WidgetOutput, WidgetRegistry};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn tools_server(tools: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tools": tools })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_catalog_over_http() {
    let server = tools_server(json!([
        {"slug": "uuid", "name": "UUID Generator", "description": "Generate a UUID", "category": "dev", "endpoint": "/api/uuid"},
        {"slug": "weather", "name": "Weather", "description": "Forecast", "category": "data", "endpoint": "/api/weather"}
    ]))
    .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let snapshot = CatalogLoader::fetch(&backend).await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.tools()[0].slug, "uuid");
    assert_eq!(snapshot.tools()[1].slug, "weather");
}

#[tokio::test]
async fn test_catalog_server_error_soft_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let outcome = CatalogLoader::fetch(&backend).await;
    assert!(matches!(outcome, Err(ToolhubError::Status(500))));

    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    assert!(hub.finish_catalog(outcome));
    assert!(!hub.catalog().is_loading());
    assert!(hub.filtered().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_soft_fails() {
    // nothing listens on the discard port
    let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();
    let outcome = CatalogLoader::fetch(&backend).await;
    assert!(matches!(outcome, Err(ToolhubError::Network(_))));
}

#[tokio::test]
async fn test_widget_params_are_encoded() {
    let server = tools_server(json!([
        {"slug": "currency-converter", "name": "Converter", "category": "finance", "endpoint": "/api/convert"}
    ]))
    .await;
    Mock::given(method("GET"))
        .and(path("/api/convert"))
        .and(query_param("from", "US D"))
        .and(query_param("to", "EUR&x=1"))
        .and(query_param("amount", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "from": "US D", "to": "EUR&x=1", "amount": 100, "result": 92.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    hub.finish_catalog(CatalogLoader::fetch(&backend).await);

    assert!(hub.select_slug("currency-converter").unwrap().is_none());
    let instance = hub.active_mut().unwrap();
    instance.set_field("from", "US D").unwrap();
    instance.set_field("to", "EUR&x=1").unwrap();

    let request = hub.trigger().unwrap();
    assert!(hub.apply(execute(&backend, request).await));
    assert_eq!(hub.active().unwrap().state().clone(), RequestState::Success(json!({
        "from": "US D", "to": "EUR&x=1", "amount": 100, "result": 92.5
    })));
}

#[tokio::test]
async fn test_error_payload_with_failure_status() {
    let server = tools_server(json!([
        {"slug": "pokemon", "name": "Pokemon", "category": "fun", "endpoint": "/api/pokemon"}
    ]))
    .await;
    Mock::given(method("GET"))
        .and(path("/api/pokemon"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Pokemon not found"})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    hub.finish_catalog(CatalogLoader::fetch(&backend).await);

    let request = hub.select_slug("pokemon").unwrap().unwrap();
    hub.apply(execute(&backend, request).await);
    assert_eq!(
        hub.active().unwrap().state(),
        &RequestState::Error("Pokemon not found".to_string())
    );
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let err = backend.get_json("/api/ip", &[]).await.unwrap_err();
    assert!(matches!(err, ToolhubError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_user_agent_and_timeout_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-agent"))
        .and(header("user-agent", "toolhub-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_agent": "toolhub-test"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/joke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"text": "slow"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let options = HttpOptions {
        timeout: Some(Duration::from_millis(200)),
        user_agent: "toolhub-test".to_string(),
    };
    let backend = HttpBackend::with_options(server.uri(), options).unwrap();

    let body = backend.get_json("/api/user-agent", &[]).await.unwrap();
    assert_eq!(body["user_agent"], "toolhub-test");

    let err = backend.get_json("/api/joke", &[]).await.unwrap_err();
    assert!(matches!(err, ToolhubError::Network(_)));
}

#[tokio::test]
async fn test_failure_status_without_marker_is_error() {
    let server = tools_server(json!([
        {"slug": "uuid", "name": "UUID Generator", "category": "dev", "endpoint": "/api/uuid"}
    ]))
    .await;
    Mock::given(method("GET"))
        .and(path("/api/uuid"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "service down"})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let err = backend.get_json("/api/uuid", &[]).await.unwrap_err();
    assert!(matches!(err, ToolhubError::Status(503)));

    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    hub.finish_catalog(CatalogLoader::fetch(&backend).await);
    let request = hub.select_slug("uuid").unwrap().unwrap();
    hub.apply(execute(&backend, request).await);

    let instance = hub.active().unwrap();
    assert_eq!(instance.state(), &RequestState::Error("Request failed (HTTP 503)".to_string()));
    assert_eq!(
        instance.output(hub.base_url()),
        WidgetOutput::Failed("Request failed (HTTP 503)".to_string())
    );
}

#[tokio::test]
async fn test_failure_status_with_marker_keeps_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "upstream unavailable"})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let body = backend.get_json("/api/weather", &[]).await.unwrap();
    assert_eq!(body["error"], "upstream unavailable");
}

//! Catalog, dispatch and widget lifecycle integration tests
//!
//! Drives a `Hub` against a scripted `MockBackend` the way the front-ends do.

use serde_json::json;
use toolhub::backend::{Backend, CATALOG_PATH, MockBackend, MockReply};
use toolhub::catalog::{CatalogLoader, filter};
use toolhub::dispatch::Resolution;
use toolhub::error::Result;
use toolhub::hub::{Hub, execute};
use toolhub::widgets::{Block, RequestState, WidgetOutput, WidgetRegistry};

fn uuid_catalog() -> serde_json::Value {
    json!({"tools": [{
        "slug": "uuid",
        "name": "UUID Generator",
        "description": "Generate a UUID",
        "category": "dev",
        "endpoint": "/api/uuid"
    }]})
}

async fn loaded_hub(backend: &dyn Backend) -> Hub {
    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    let outcome = CatalogLoader::fetch(backend).await;
    assert!(hub.finish_catalog(outcome));
    hub
}

#[tokio::test]
async fn test_catalog_query_scenario() {
    let backend = MockBackend::new().with_json(CATALOG_PATH, uuid_catalog());
    let mut hub = loaded_hub(&backend).await;

    for query in ["uuid", "Generate", "dev"] {
        hub.set_query(query);
        let found = hub.filtered();
        assert_eq!(found.len(), 1, "query {:?}", query);
        assert_eq!(found[0].slug, "uuid");
    }

    hub.set_query("zzz");
    assert!(hub.filtered().is_empty());
}

#[tokio::test]
async fn test_catalog_failure_is_empty_for_any_query() {
    let backend = MockBackend::new().with_reply(CATALOG_PATH, MockReply::NetworkError("connection refused".into()));
    let mut hub = Hub::new(WidgetRegistry::builtin(), backend.base_url());
    assert!(hub.catalog().is_loading());

    let outcome = CatalogLoader::fetch(&backend).await;
    assert!(outcome.is_err());
    assert!(hub.finish_catalog(outcome));
    assert!(!hub.catalog().is_loading());

    for query in ["", "uuid", "a"] {
        hub.set_query(query);
        assert!(hub.filtered().is_empty());
    }

    // loading clears exactly once
    assert!(!hub.finish_catalog(Ok(Default::default())));
    assert!(!hub.catalog().is_loading());
}

#[tokio::test]
async fn test_catalog_malformed_body_soft_fails() {
    let backend = MockBackend::new().with_json(CATALOG_PATH, json!({"tools": "nope"}));
    let hub = loaded_hub(&backend).await;
    assert!(hub.filtered().is_empty());
}

#[tokio::test]
async fn test_filter_is_idempotent_over_snapshot() {
    let backend = MockBackend::new().with_json(
        CATALOG_PATH,
        json!({"tools": [
            {"slug": "a", "name": "Alpha", "description": "first", "category": "x", "endpoint": "/a"},
            {"slug": "b", "name": "Beta", "description": "second", "category": "y", "endpoint": "/b"},
            {"slug": "c", "name": "Gamma", "description": "alpha-ish", "category": "x", "endpoint": "/c"}
        ]}),
    );
    let hub = loaded_hub(&backend).await;
    let tools = hub.catalog().snapshot().tools();

    let first: Vec<_> = filter(tools, "ALPHA").iter().map(|t| t.slug.clone()).collect();
    let second: Vec<_> = filter(tools, "ALPHA").iter().map(|t| t.slug.clone()).collect();
    assert_eq!(first, vec!["a", "c"]);
    assert_eq!(first, second);
    assert_eq!(filter(tools, "").len(), 3);
}

#[tokio::test]
async fn test_unknown_tool_renders_fallback() -> Result<()> {
    let backend = MockBackend::new().with_json(
        CATALOG_PATH,
        json!({"tools": [{
            "slug": "unknown-tool",
            "name": "Mystery",
            "description": "",
            "category": "misc",
            "endpoint": "https://elsewhere.example/tool"
        }]}),
    );
    let mut hub = loaded_hub(&backend).await;

    assert!(hub.select_slug("unknown-tool")?.is_none());
    match hub.resolution() {
        Resolution::Fallback { descriptor } => assert_eq!(descriptor.endpoint, "https://elsewhere.example/tool"),
        other => panic!("expected fallback, got {:?}", other),
    }
    // only the catalog was fetched
    assert_eq!(backend.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_error_payload_then_retrigger() -> Result<()> {
    let backend = MockBackend::new()
        .with_json(CATALOG_PATH, json!({"tools": [{"slug": "dictionary", "name": "Dictionary", "endpoint": "/api/dictionary"}]}))
        .with_json("/api/dictionary", json!({"error": "not found"}))
        .with_json("/api/dictionary", json!({"word": "example", "meanings": []}));
    let mut hub = loaded_hub(&backend).await;

    // dictionary auto-loads on selection
    let request = hub.select_slug("dictionary")?.expect("auto-load request");
    assert!(hub.active().unwrap().is_loading());
    let completion = execute(&backend, request).await;
    assert!(hub.apply(completion));
    assert_eq!(hub.active().unwrap().state(), &RequestState::Error("not found".to_string()));
    assert_eq!(
        hub.active().unwrap().output(hub.base_url()),
        WidgetOutput::Failed("not found".to_string())
    );

    // triggering again clears the error before any new result
    let request = hub.trigger().expect("retrigger");
    assert_eq!(hub.active().unwrap().state(), &RequestState::Loading);
    assert_eq!(hub.active().unwrap().output(hub.base_url()), WidgetOutput::Loading);

    let completion = execute(&backend, request).await;
    hub.apply(completion);
    assert!(matches!(hub.active().unwrap().state(), RequestState::Success(_)));
    Ok(())
}

#[tokio::test]
async fn test_detail_marker_and_transport_error() -> Result<()> {
    let backend = MockBackend::new()
        .with_json(CATALOG_PATH, json!({"tools": [{"slug": "weather", "name": "Weather", "endpoint": "/api/weather"}]}))
        .with_json("/api/weather", json!({"detail": "city not found"}))
        .with_reply("/api/weather", MockReply::Status(502));
    let mut hub = loaded_hub(&backend).await;
    assert!(hub.select_slug("weather")?.is_none());

    let request = hub.trigger().unwrap();
    assert_eq!(request.params, vec![("city".to_string(), "London".to_string())]);
    hub.apply(execute(&backend, request).await);
    assert_eq!(hub.active().unwrap().state(), &RequestState::Error("city not found".to_string()));

    let request = hub.trigger().unwrap();
    hub.apply(execute(&backend, request).await);
    match hub.active().unwrap().state() {
        RequestState::Error(message) => assert!(message.contains("502")),
        other => panic!("expected error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_last_completion_wins() -> Result<()> {
    let backend = MockBackend::new()
        .with_json(CATALOG_PATH, json!({"tools": [{"slug": "random-joke", "name": "Joke", "endpoint": "/api/joke"}]}))
        .with_json("/api/joke", json!({"text": "first"}))
        .with_json("/api/joke", json!({"text": "second"}));
    let mut hub = loaded_hub(&backend).await;

    let first = hub.select_slug("random-joke")?.unwrap();
    let second = hub.trigger().unwrap();
    let first_done = execute(&backend, first).await;
    let second_done = execute(&backend, second).await;

    // completions land out of order; the later one is shown
    hub.apply(second_done);
    hub.apply(first_done);
    assert_eq!(
        hub.active().unwrap().output(hub.base_url()),
        WidgetOutput::Ready(vec![Block::Text("first".to_string())])
    );
    Ok(())
}

#[tokio::test]
async fn test_switching_tools_drops_stale_completion() -> Result<()> {
    let backend = MockBackend::new()
        .with_json(
            CATALOG_PATH,
            json!({"tools": [
                {"slug": "uuid", "name": "UUID", "endpoint": "/api/uuid"},
                {"slug": "random-quote", "name": "Quote", "endpoint": "/api/quote"}
            ]}),
        )
        .with_json("/api/uuid", json!({"uuid": "abc"}))
        .with_json("/api/quote", json!({"content": "Be.", "author": "Someone"}));
    let mut hub = loaded_hub(&backend).await;

    let uuid_request = hub.select_slug("uuid")?.unwrap();
    let quote_request = hub.select_slug("random-quote")?.unwrap();

    assert!(!hub.apply(execute(&backend, uuid_request).await));
    assert!(hub.active().unwrap().is_loading());
    assert!(hub.apply(execute(&backend, quote_request).await));
    assert_eq!(hub.active().unwrap().spec().slug, "random-quote");
    assert!(matches!(hub.active().unwrap().state(), RequestState::Success(_)));
    Ok(())
}

#[tokio::test]
async fn test_image_widgets_never_fetch() -> Result<()> {
    let backend = MockBackend::new().with_json(
        CATALOG_PATH,
        json!({"tools": [
            {"slug": "qr-generator", "name": "QR", "endpoint": "/api/qr"},
            {"slug": "cat-image", "name": "Cat", "endpoint": "/api/cat"},
            {"slug": "favicon-fetcher", "name": "Favicon", "endpoint": "/api/favicon"}
        ]}),
    );
    let mut hub = loaded_hub(&backend).await;

    assert!(hub.select_slug("qr-generator")?.is_none());
    hub.active_mut().unwrap().set_field("text", "hi there")?;
    assert!(hub.trigger().is_none());
    match hub.active().unwrap().output(hub.base_url()) {
        WidgetOutput::Ready(blocks) => assert_eq!(
            blocks,
            vec![Block::Image {
                alt: "QR".to_string(),
                url: "http://mock.local/api/qr?text=hi+there".to_string(),
            }]
        ),
        other => panic!("expected image, got {:?}", other),
    }

    assert!(hub.select_slug("cat-image")?.is_none());
    assert!(hub.trigger().is_none());
    match hub.active().unwrap().output(hub.base_url()) {
        WidgetOutput::Ready(blocks) => match &blocks[0] {
            Block::Image { url, .. } => assert!(url.starts_with("http://mock.local/api/cat?ts=")),
            other => panic!("expected image, got {:?}", other),
        },
        other => panic!("expected image, got {:?}", other),
    }

    assert!(hub.select_slug("favicon-fetcher")?.is_none());
    assert_eq!(hub.active().unwrap().output(hub.base_url()), WidgetOutput::Idle);
    hub.trigger();
    match hub.active().unwrap().output(hub.base_url()) {
        WidgetOutput::Ready(blocks) => match &blocks[0] {
            Block::Image { url, .. } => assert!(url.ends_with("size=64")),
            other => panic!("expected image, got {:?}", other),
        },
        other => panic!("expected image, got {:?}", other),
    }

    // only the catalog was fetched
    assert_eq!(backend.calls().len(), 1);
    Ok(())
}

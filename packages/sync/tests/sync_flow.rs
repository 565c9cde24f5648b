//! Integration tests for the sync client against a mock transport

use async_trait::async_trait;
use inlay_dom::{DocumentTree, NodeId};
use inlay_editor::{Baseline, EditorConfig, SectionRegistry};
use inlay_sync::{
    MockTransport, SyncClient, SyncError, SyncOutcome, Transport, TransportResponse,
};
use std::sync::Arc;
use tokio::sync::Notify;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn page() -> (DocumentTree, SectionRegistry, NodeId, NodeId) {
    let mut tree = DocumentTree::new("html");
    let body = tree.append_element(tree.root(), "body");
    let main = tree.append_element(body, "main");
    let section = tree.append_element(main, "section");
    tree.add_class(section, "hero");

    let h1 = tree.append_element(section, "h1");
    tree.set_text(h1, "Old headline");
    let p = tree.append_element(section, "p");
    tree.set_text(p, "Old body");

    let mut registry = SectionRegistry::new();
    registry.scan(&tree, &["h1".to_string(), "p".to_string()], "/about");
    (tree, registry, h1, p)
}

fn client(config: &EditorConfig) -> (SyncClient<Arc<MockTransport>>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    (SyncClient::new(transport.clone(), config), transport)
}

#[tokio::test]
async fn test_clean_save_makes_no_network_call() {
    init_tracing();
    let (_tree, mut registry, _, _) = page();
    let (client, transport) = client(&EditorConfig::default());

    let outcome = client.save(&mut registry, None).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Clean);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_successful_save_promotes_saved_text() {
    init_tracing();
    let (_tree, mut registry, h1, _) = page();
    let (client, transport) = client(&EditorConfig::default());

    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
    assert_eq!(registry.changed_since(Baseline::Save).len(), 1);

    let outcome = client.save(&mut registry, None).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Completed { sections: 1 });

    let section = registry.find_by_node(h1).unwrap();
    assert_eq!(section.saved_text, "Welcome");
    assert!(registry.changed_since(Baseline::Save).is_empty());
    // Saved but not yet published.
    assert_eq!(registry.changed_since(Baseline::Publish).len(), 1);
    assert!(!client.is_busy());

    // Only the dirty section traveled, with page metadata alongside.
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, "/save");
    let body = &requests[0].body;
    assert_eq!(body["page"], "/about");
    assert_eq!(body["sections"].as_array().unwrap().len(), 1);
    assert_eq!(body["sections"][0]["path"], "body main section.hero h1");
    assert_eq!(body["sections"][0]["text"], "Welcome");
}

#[tokio::test]
async fn test_failed_save_preserves_dirty_state() {
    init_tracing();
    let (_tree, mut registry, h1, _) = page();
    let (client, transport) = client(&EditorConfig::default());
    transport.enqueue(TransportResponse::status(500));

    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();

    let result = client.save(&mut registry, None).await;
    assert!(matches!(result, Err(SyncError::Status { status: 500, .. })));

    // Dirty state intact, busy flag cleared: a retry is possible.
    assert_eq!(registry.changed_since(Baseline::Save).len(), 1);
    assert!(!client.is_busy());

    let outcome = client.save(&mut registry, None).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Completed { sections: 1 });
    assert!(registry.changed_since(Baseline::Save).is_empty());
}

#[tokio::test]
async fn test_save_reconciles_against_echoed_states() {
    init_tracing();
    let (_tree, mut registry, h1, _) = page();
    let (client, transport) = client(&EditorConfig::default());

    // Server normalizes the content it persisted.
    transport.enqueue(TransportResponse::ok_with(serde_json::json!({
        "sections": [
            { "path": "body main section.hero h1", "text": "Welcome!" }
        ]
    })));

    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
    client.save(&mut registry, None).await.unwrap();

    let section = registry.find_by_node(h1).unwrap();
    assert_eq!(section.saved_text, "Welcome!");
}

#[tokio::test]
async fn test_publish_promotes_entire_registry() {
    init_tracing();
    let (_tree, mut registry, h1, _p) = page();
    let (client, transport) = client(&EditorConfig::default());

    // Save an edit first so there is unpublished work.
    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
    client.save(&mut registry, None).await.unwrap();
    assert_eq!(registry.changed_since(Baseline::Publish).len(), 1);

    let outcome = client.publish(&mut registry).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Completed { sections: 1 });
    assert!(registry.changed_since(Baseline::Publish).is_empty());

    // Promotion covers every section, not just the dirty subset.
    for section in registry.iter() {
        assert_eq!(section.original_text, section.saved_text);
    }

    // The publish body carried the full section list.
    let requests = transport.requests();
    assert_eq!(requests[1].endpoint, "/publish");
    assert_eq!(requests[1].body["sections"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_publish_with_nothing_unpublished_is_clean() {
    init_tracing();
    let (_tree, mut registry, _, _) = page();
    let (client, transport) = client(&EditorConfig::default());

    let outcome = client.publish(&mut registry).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Clean);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_authorization_header_attached_when_configured() {
    init_tracing();
    let (_tree, mut registry, h1, _) = page();
    let config = EditorConfig {
        authorization: Some("Bearer abc123".to_string()),
        ..EditorConfig::default()
    };
    let (client, transport) = client(&config);

    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
    client.save(&mut registry, None).await.unwrap();

    assert_eq!(
        transport.requests()[0].authorization.as_deref(),
        Some("Bearer abc123")
    );
}

#[tokio::test]
async fn test_upload_returns_embed_path() {
    init_tracing();
    let (client, transport) = client(&EditorConfig::default());

    transport.enqueue(TransportResponse::ok_with(serde_json::json!({
        "path": "/media/photo.jpg"
    })));

    let path = client.upload("photo.jpg", vec![0xff, 0xd8]).await.unwrap();
    assert_eq!(path, "/media/photo.jpg");
    assert_eq!(transport.requests()[0].endpoint, "/upload");
    assert!(!client.is_busy());
}

#[tokio::test]
async fn test_upload_failure_surfaces_status() {
    init_tracing();
    let (client, transport) = client(&EditorConfig::default());
    transport.enqueue(TransportResponse::status(413));

    let result = client.upload("huge.bin", vec![0; 16]).await;
    assert!(matches!(result, Err(SyncError::Status { status: 413, .. })));
    assert!(!client.is_busy());
}

/// Transport that parks every JSON POST until the test opens the gate,
/// so a request can be held in flight deliberately.
struct GatedTransport {
    gate: Notify,
    inner: MockTransport,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Result<TransportResponse, SyncError> {
        self.gate.notified().await;
        self.inner.post_json(endpoint, authorization, body).await
    }

    async fn post_bytes(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TransportResponse, SyncError> {
        self.inner
            .post_bytes(endpoint, authorization, filename, bytes)
            .await
    }
}

#[tokio::test]
async fn test_overlapping_save_reports_busy() {
    init_tracing();
    let transport = Arc::new(GatedTransport {
        gate: Notify::new(),
        inner: MockTransport::new(),
    });
    let client = Arc::new(SyncClient::new(transport.clone(), &EditorConfig::default()));

    let (_tree, mut registry, h1, _) = page();
    registry.find_by_node_mut(h1).unwrap().edited_text = "First".to_string();

    let in_flight = tokio::spawn({
        let client = client.clone();
        async move { client.save(&mut registry, None).await }
    });
    while !client.is_busy() {
        tokio::task::yield_now().await;
    }

    // A second save while the first is parked at the transport.
    let (_tree, mut other, h1, _) = page();
    other.find_by_node_mut(h1).unwrap().edited_text = "Second".to_string();
    let outcome = client.save(&mut other, None).await.unwrap();
    assert_eq!(outcome, SyncOutcome::Busy);
    // Suppressed, not consumed: the dirty state is still there.
    assert_eq!(other.changed_since(Baseline::Save).len(), 1);

    transport.gate.notify_one();
    let outcome = in_flight.await.unwrap().unwrap();
    assert_eq!(outcome, SyncOutcome::Completed { sections: 1 });
    assert!(!client.is_busy());
}

#[tokio::test]
async fn test_custom_endpoints_from_config() {
    init_tracing();
    let (_tree, mut registry, h1, _) = page();
    let config = EditorConfig {
        save_endpoint: "/api/v2/save".to_string(),
        ..EditorConfig::default()
    };
    let (client, transport) = client(&config);

    registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
    client.save(&mut registry, None).await.unwrap();

    assert_eq!(transport.requests()[0].endpoint, "/api/v2/save");
}

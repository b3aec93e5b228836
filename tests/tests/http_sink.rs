//! HTTP transport tests against a loopback collector.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::Value;

use collector_client::{CollectorConfig, EventSink, HttpSink};
use engagement_core::{
    ContentType, DiscoveryEvent, Error, InteractionType, PostViewEvent, ProfileViewEvent,
    TelemetryEvent, TrafficSource,
};

type Captured = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

async fn capture(
    State(captured): State<Captured>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    captured.lock().push((uri.path().to_string(), auth, body));
    StatusCode::OK
}

/// Starts a capturing collector on a random loopback port and returns
/// its base URL.
async fn spawn_collector(captured: Captured) -> String {
    let app = Router::new().fallback(capture).with_state(captured);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn profile_view_lands_on_its_endpoint_with_credentials() {
    let captured: Captured = Arc::default();
    let base_url = spawn_collector(captured.clone()).await;

    let sink = HttpSink::new(CollectorConfig {
        base_url,
        api_key: Some("secret-key".to_string()),
        ..Default::default()
    })
    .expect("Failed to create sink");

    sink.submit(TelemetryEvent::ProfileView(ProfileViewEvent {
        profile_user_id: "u42".to_string(),
        source: TrafficSource::Share,
    }))
    .await
    .expect("Submit failed");

    let requests = captured.lock();
    assert_eq!(requests.len(), 1);
    let (path, auth, body) = &requests[0];
    assert_eq!(path, "/api/profiles/view");
    assert_eq!(auth.as_deref(), Some("Bearer secret-key"));
    assert_eq!(body["profileUserId"], "u42");
    assert_eq!(body["source"], "share");
}

#[tokio::test]
async fn post_view_is_keyed_by_content_id_in_the_path() {
    let captured: Captured = Arc::default();
    let base_url = spawn_collector(captured.clone()).await;

    let sink = HttpSink::new(CollectorConfig {
        base_url,
        ..Default::default()
    })
    .expect("Failed to create sink");

    sink.submit(TelemetryEvent::PostView(PostViewEvent {
        post_id: "p7".to_string(),
        source: TrafficSource::Feed,
    }))
    .await
    .expect("Submit failed");

    let requests = captured.lock();
    let (path, auth, body) = &requests[0];
    assert_eq!(path, "/api/posts/p7/view");
    assert_eq!(auth.as_deref(), None);
    assert_eq!(body, &serde_json::json!({ "source": "feed" }));
}

#[tokio::test]
async fn discovery_body_serializes_camel_case() {
    let captured: Captured = Arc::default();
    let base_url = spawn_collector(captured.clone()).await;

    let sink = HttpSink::new(CollectorConfig {
        base_url,
        ..Default::default()
    })
    .expect("Failed to create sink");

    sink.submit(TelemetryEvent::Discovery(DiscoveryEvent {
        content_id: "c9".to_string(),
        content_type: ContentType::Voice,
        interaction_type: InteractionType::Rewatch,
        watch_time_ms: Some(2500),
        completion_rate: Some(0.5),
        rewatch_count: Some(1),
        skipped_at_ms: None,
        creator_id: None,
        session_id: "s-1".to_string(),
    }))
    .await
    .expect("Submit failed");

    let requests = captured.lock();
    let (path, _, body) = &requests[0];
    assert_eq!(path, "/api/analytics/discovery");
    assert_eq!(body["contentType"], "voice");
    assert_eq!(body["interactionType"], "rewatch");
    assert_eq!(body["rewatchCount"], 1);
    assert!(body.get("skippedAtMs").is_none());
}

#[tokio::test]
async fn non_success_status_maps_to_collector_error() {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    let sink = HttpSink::new(CollectorConfig {
        base_url: format!("http://{}", addr),
        ..Default::default()
    })
    .expect("Failed to create sink");

    let result = sink
        .submit(TelemetryEvent::PostView(PostViewEvent {
            post_id: "p1".to_string(),
            source: TrafficSource::Feed,
        }))
        .await;

    assert!(matches!(result, Err(Error::Collector { status: 500 })));
}

#[tokio::test]
async fn unreachable_collector_maps_to_transport_error() {
    // Nothing listens on port 1.
    let sink = HttpSink::new(CollectorConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    })
    .expect("Failed to create sink");

    let result = sink
        .submit(TelemetryEvent::PostView(PostViewEvent {
            post_id: "p1".to_string(),
            source: TrafficSource::Feed,
        }))
        .await;

    assert!(matches!(result, Err(Error::Transport(_))));
}

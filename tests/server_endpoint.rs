//! Endpoint tests — the axum surface over a scripted provider.
//!
//! Binds an ephemeral port and exercises the real HTTP stack, so the JSON
//! envelope and status mapping are tested exactly as clients see them.

mod support;

use reply_copilot::pipeline::ReplyGenerationService;
use reply_copilot::{server, Config, UpstreamError, UpstreamKind};
use std::sync::Arc;
use support::MockVisionClient;

async fn spawn_server(client: Arc<MockVisionClient>) -> String {
    let service = Arc::new(ReplyGenerationService::new(client, &Config::default()));
    let router = server::create_router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let base = spawn_server(Arc::new(MockVisionClient::returning(""))).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/api/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "reply-copilot-backend");
}

#[tokio::test]
async fn generate_returns_the_full_envelope() {
    let client = Arc::new(MockVisionClient::returning(
        "- Sounds great!\n- See you at 3pm 😊",
    ));
    let base = spawn_server(client).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generateReplies"))
        .json(&serde_json::json!({
            "image": "QUFBQQ==",
            "platform": "imessage",
            "tone": "friendly",
            "userId": "user-123",
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    assert!(
        response.headers().contains_key("x-processing-time"),
        "processing-time header must be set"
    );

    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["success"], true);
    assert_eq!(
        body["suggestions"],
        serde_json::json!(["Sounds great!", "See you at 3pm 😊"])
    );
    assert_eq!(body["platform"], "imessage");
    assert_eq!(body["tone"], "friendly");
    assert!(body["processingTime"].is_u64());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn missing_image_maps_to_400() {
    let base = spawn_server(Arc::new(MockVisionClient::returning("- hi"))).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generateReplies"))
        .json(&serde_json::json!({ "platform": "whatsapp", "tone": "friendly" }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert!(body["error"].as_str().unwrap_or_default().contains("image"));
}

#[tokio::test]
async fn invalid_tone_maps_to_400_naming_the_allowed_values() {
    let base = spawn_server(Arc::new(MockVisionClient::returning("- hi"))).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generateReplies"))
        .json(&serde_json::json!({
            "image": "QUFBQQ==",
            "platform": "whatsapp",
            "tone": "sarcastic",
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    let error = response.json::<serde_json::Value>().await.expect("json")["error"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(error.contains("sarcastic"));
    assert!(error.contains("professional"));
}

#[tokio::test]
async fn omitted_platform_and_tone_use_the_defaults() {
    let client = Arc::new(MockVisionClient::returning("- hello there"));
    let base = spawn_server(client).await;

    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{base}/api/generateReplies"))
        .json(&serde_json::json!({ "image": "QUFBQQ==" }))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["platform"], "whatsapp");
    assert_eq!(body["tone"], "friendly");
}

#[tokio::test]
async fn upstream_failure_maps_to_500_without_provider_detail() {
    let client = Arc::new(MockVisionClient::failing(UpstreamError::new(
        UpstreamKind::Api(500),
        "internal provider stack trace",
    )));
    let base = spawn_server(client).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generateReplies"))
        .json(&serde_json::json!({
            "image": "QUFBQQ==",
            "platform": "whatsapp",
            "tone": "friendly",
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 500);
    let text = response.text().await.expect("body");
    assert!(text.contains("Failed to generate replies"));
    assert!(
        !text.contains("stack trace"),
        "provider detail must never reach the client"
    );
}

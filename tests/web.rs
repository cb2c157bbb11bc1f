use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{json, Value};

use memeforge::adapter::{claude::TextGenerator, image::ImageGenerator};
use memeforge::components::{
    generator::MemeGenerator,
    trending::TrendingAggregator,
    web::{self, WebState},
};

fn state_for(server: &MockServer) -> Arc<WebState> {
    let trending = Arc::new(TrendingAggregator::new(Duration::from_secs(60)));
    let text =
        TextGenerator::new(&server.base_url(), "text-key", "claude-test").expect("text generator");
    let image =
        ImageGenerator::new(&server.base_url(), "image-key", "image-test").expect("image generator");
    let generator = MemeGenerator::new(text, image, trending.clone());
    Arc::new(WebState {
        generator,
        trending,
        app_args: json!({ "port": 0 }),
    })
}

async fn spawn(state: Arc<WebState>) -> SocketAddr {
    let app = web::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });
    addr
}

#[tokio::test]
async fn liveness_and_metadata() {
    let server = MockServer::start();
    let addr = spawn(state_for(&server)).await;
    let client = reqwest::Client::new();

    let root = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("root");
    assert_eq!(root.status().as_u16(), 200);
    assert!(root.text().await.expect("body").contains("memeforge"));

    let metadata: Value = client
        .get(format!("http://{}/metadata", addr))
        .send()
        .await
        .expect("metadata")
        .json()
        .await
        .expect("metadata json");
    assert!(metadata.get("revision").is_some());
    assert_eq!(metadata.pointer("/args/port"), Some(&json!(0)));
}

#[tokio::test]
async fn trending_endpoint_serves_fallbacks_and_cache_flag() {
    let server = MockServer::start();
    let addr = spawn(state_for(&server)).await;
    let client = reqwest::Client::new();

    // No sources registered: static fallbacks for the requested mood.
    let first: Value = client
        .get(format!("http://{}/trending?mood=tech", addr))
        .send()
        .await
        .expect("trending")
        .json()
        .await
        .expect("trending json");
    assert_eq!(first["cached"], json!(false));
    assert_eq!(first["mood"], json!("tech"));
    assert_eq!(first.pointer("/sources/fallback"), Some(&json!(3)));
    let topics = first["topics"].as_array().expect("topics");
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0]["rank"], json!(1));
    assert_eq!(topics[0]["source"], json!("fallback"));

    let second: Value = client
        .get(format!("http://{}/trending?mood=tech", addr))
        .send()
        .await
        .expect("trending")
        .json()
        .await
        .expect("trending json");
    assert_eq!(second["cached"], json!(true));
    assert_eq!(second["timestamp"], first["timestamp"]);

    let forced: Value = client
        .get(format!("http://{}/trending?mood=tech&forceRefresh=true", addr))
        .send()
        .await
        .expect("trending")
        .json()
        .await
        .expect("trending json");
    assert_eq!(forced["cached"], json!(false));
}

#[tokio::test]
async fn unknown_mood_canonicalizes_to_viral() {
    let server = MockServer::start();
    let addr = spawn(state_for(&server)).await;

    let body: Value = reqwest::Client::new()
        .get(format!("http://{}/trending?mood=bogus", addr))
        .send()
        .await
        .expect("trending")
        .json()
        .await
        .expect("trending json");
    assert_eq!(body["mood"], json!("viral"));
}

#[tokio::test]
async fn generate_happy_path_over_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(200).json_body(json!({
            "content": [ { "type": "text", "text": "CONCEPT:A laptop on fire|TEXT:Just deploy on Friday" } ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/images/generations");
        then.status(200)
            .json_body(json!({ "data": [ { "url": "https://img.example/friday.png" } ] }));
    });

    let addr = spawn(state_for(&server)).await;
    let body: Value = reqwest::Client::new()
        .post(format!("http://{}/generate", addr))
        .json(&json!({ "text": "deploy friday", "skipTrendingFetch": true, "user_id": "u1" }))
        .send()
        .await
        .expect("generate")
        .json()
        .await
        .expect("generate json");

    assert_eq!(body["text"], json!("Just deploy on Friday"));
    assert!(body["image_url"].as_str().expect("url").starts_with("http"));
    assert_eq!(body["template"], json!("auto"));
    assert!(body.get("id").is_some());
    assert!(body.get("created_at").is_some());
}

#[tokio::test]
async fn generate_rejects_bad_json_and_unknown_template() {
    let server = MockServer::start();
    let addr = spawn(state_for(&server)).await;
    let client = reqwest::Client::new();

    let bad = client
        .post(format!("http://{}/generate", addr))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("bad json");
    assert_eq!(bad.status().as_u16(), 400);
    let envelope: Value = bad.json().await.expect("envelope");
    assert_eq!(envelope["error"], json!("Invalid request"));
    assert!(envelope.get("userMessage").is_some());
    assert!(envelope.get("timestamp").is_some());

    let unknown = client
        .post(format!("http://{}/generate", addr))
        .json(&json!({ "text": "x", "template": "no_such_template" }))
        .send()
        .await
        .expect("unknown template");
    assert_eq!(unknown.status().as_u16(), 400);
    let envelope: Value = unknown.json().await.expect("envelope");
    assert_eq!(envelope["error"], json!("Invalid request"));
    assert!(envelope["details"]
        .as_str()
        .expect("details")
        .contains("no_such_template"));
}

#[tokio::test]
async fn generate_maps_upstream_failures_to_envelopes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(200).json_body(json!({
            "content": [ { "type": "text", "text": "CONCEPT:A queue|TEXT:Please hold" } ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/images/generations");
        then.status(429)
            .json_body(json!({ "error": { "message": "slow down" } }));
    });

    let addr = spawn(state_for(&server)).await;
    let response = reqwest::Client::new()
        .post(format!("http://{}/generate", addr))
        .json(&json!({ "text": "busy", "skipTrendingFetch": true }))
        .send()
        .await
        .expect("generate");
    assert_eq!(response.status().as_u16(), 500);
    let envelope: Value = response.json().await.expect("envelope");
    assert_eq!(envelope["error"], json!("Image API rate limit exceeded"));
    assert!(envelope["userMessage"]
        .as_str()
        .expect("user message")
        .contains("Too many requests"));
}

#[tokio::test]
async fn moderation_exhaustion_returns_400_with_suggestions() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(200).json_body(json!({
            "content": [ { "type": "text", "text": "CONCEPT:A wall|TEXT:Blocked again" } ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/images/generations");
        then.status(400).json_body(json!({
            "error": { "code": "moderation_blocked", "message": "flagged" }
        }));
    });

    let addr = spawn(state_for(&server)).await;
    let response = reqwest::Client::new()
        .post(format!("http://{}/generate", addr))
        .json(&json!({ "text": "blocked", "skipTrendingFetch": true }))
        .send()
        .await
        .expect("generate");
    assert_eq!(response.status().as_u16(), 400);
    let envelope: Value = response.json().await.expect("envelope");
    assert_eq!(envelope["error"], json!("Content moderation block"));
    assert_eq!(
        envelope["suggestions"].as_array().expect("suggestions").len(),
        4
    );
}

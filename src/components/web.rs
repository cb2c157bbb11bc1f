use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use super::{
    generator::{self, GenerateRequest, MemeGenerator},
    trending::TrendingAggregator,
};
use crate::adapter::image;
use crate::common::{mood::Mood, topic};

#[derive(Error, Debug)]
pub enum Error {
    #[error("std::io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Axum error: {0}")]
    Axum(#[from] axum::Error),
}

pub struct WebState {
    pub generator: MemeGenerator,
    pub trending: Arc<TrendingAggregator>,
    pub app_args: Value,
}

async fn logging_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let path = req
        .uri()
        .path_and_query()
        .map_or(String::new(), |p| p.to_string());
    let method = req.method().to_string();

    let response = next.run(req).await;

    info!(
        client = addr.to_string(),
        method = method,
        path = path,
        status = response.status().as_str()
    );

    response
}

pub fn router(state: Arc<WebState>) -> Router {
    // The original handlers sent Access-Control-Allow-Origin: * on everything.
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(root))
        .route("/metadata", get(metadata))
        .route("/generate", post(generate))
        .route("/trending", get(trending))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

pub async fn serve(state: Arc<WebState>, port: u16) -> Result<(), Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!(port = port, "start listen");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn root() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}

async fn metadata(State(state): State<Arc<WebState>>) -> Json<Value> {
    let revision = match env!("GIT_HASH") {
        "" => "-",
        hash => hash,
    };
    Json(json!({
        "revision": revision,
        "args": state.app_args.clone(),
    }))
}

async fn generate(State(state): State<Arc<WebState>>, body: Bytes) -> Response {
    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return envelope(
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                format!("request body is not valid JSON: {}", e),
                "The request could not be understood. Please try again.".to_string(),
                None,
            );
        }
    };

    match state.generator.generate(request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            error!("meme generation failed: {}", e);
            generation_envelope(e)
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrendingParams {
    mood: Option<String>,
    #[serde(rename = "forceRefresh")]
    force_refresh: Option<String>,
}

async fn trending(
    State(state): State<Arc<WebState>>,
    Query(params): Query<TrendingParams>,
) -> Response {
    let mood = params
        .mood
        .as_deref()
        .and_then(Mood::parse)
        .unwrap_or(Mood::Viral);
    let force_refresh = params.force_refresh.as_deref() == Some("true");

    let report = state.trending.trending(mood, force_refresh).await;
    let topics = match serde_json::to_value(&report.topics) {
        Ok(topics) => topics,
        Err(e) => {
            error!("trending serialization failed: {}", e);
            return emergency_response(mood);
        }
    };

    Json(json!({
        "topics": topics,
        "cached": report.cached,
        "mood": report.mood,
        "timestamp": report.timestamp,
        "sources": report.sources,
    }))
    .into_response()
}

/// Last-resort trending payload, still HTTP 200 so clients keep rendering.
fn emergency_response(mood: Mood) -> Response {
    Json(json!({
        "topics": topic::emergency(),
        "error": true,
        "mood": mood,
        "message": "Using fallback data due to API errors",
        "timestamp": Utc::now().timestamp_millis(),
    }))
    .into_response()
}

const MODERATION_SUGGESTIONS: &[&str] = &[
    "Try topics about everyday life struggles",
    "Make memes about technology or social media",
    "Create content about food, pets, or entertainment",
    "Focus on relatable work or school experiences",
];

fn generation_envelope(error: generator::Error) -> Response {
    let details = error.to_string();
    let (status, title, user_message, suggestions) = match &error {
        generator::Error::UnknownTemplate(_) => (
            StatusCode::BAD_REQUEST,
            "Invalid request".to_string(),
            "Unknown meme template. Pick a known template or omit the field.".to_string(),
            None,
        ),
        generator::Error::ModerationExhausted => (
            StatusCode::BAD_REQUEST,
            "Content moderation block".to_string(),
            "This topic contains sensitive content that cannot be used for meme generation. \
             Please try a different, more general topic like technology, food, or everyday \
             life situations."
                .to_string(),
            Some(MODERATION_SUGGESTIONS),
        ),
        generator::Error::Text(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Text generation failed".to_string(),
            "Failed to generate meme text. Please try again.".to_string(),
            None,
        ),
        generator::Error::Image(image::Error::Timeout) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Request timeout".to_string(),
            "Image generation is taking longer than expected. Please try again.".to_string(),
            None,
        ),
        generator::Error::Image(image::Error::Network(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Network error".to_string(),
            "Unable to connect to the image generation service. Please check your connection."
                .to_string(),
            None,
        ),
        generator::Error::Image(image::Error::Api { status, .. }) => {
            let (title, user_message) = upstream_messages(*status);
            (StatusCode::INTERNAL_SERVER_ERROR, title, user_message, None)
        }
        generator::Error::Image(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image generation failed".to_string(),
            "An unexpected error occurred. Please try again.".to_string(),
            None,
        ),
    };

    envelope(status, title, details, user_message, suggestions)
}

fn upstream_messages(status: u16) -> (String, String) {
    let (title, user_message) = match status {
        401 => (
            "Image API authentication failed",
            "API key authentication failed. Please check the image API key configuration.",
        ),
        403 => (
            "Image API access forbidden",
            "Access denied. The account may not have access to the image model.",
        ),
        404 => (
            "Image model not found",
            "The image model is not available. Please verify model access.",
        ),
        429 => (
            "Image API rate limit exceeded",
            "Too many requests. Please wait a moment and try again.",
        ),
        500 => (
            "Image API server error",
            "The image service is experiencing issues. Please try again later.",
        ),
        503 => (
            "Image API service unavailable",
            "The image service is temporarily unavailable. Please try again later.",
        ),
        other => {
            return (
                format!("Image API error ({})", other),
                format!("Service error ({}). Please try again.", other),
            )
        }
    };
    (title.to_string(), user_message.to_string())
}

fn envelope(
    status: StatusCode,
    title: String,
    details: String,
    user_message: String,
    suggestions: Option<&[&str]>,
) -> Response {
    let mut body = json!({
        "error": title,
        "details": details,
        "userMessage": user_message,
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Some(suggestions) = suggestions {
        body["suggestions"] = json!(suggestions);
    }
    (status, Json(body)).into_response()
}

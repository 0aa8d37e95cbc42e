//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use log_relay::sinks::MemorySink;
use log_relay::{
    http_log_middleware, Channel, HttpLogState, LogRouter, Logger, LoggerConfig, Severity,
};

/// A served test application with capture sinks on both channels.
pub struct Harness {
    pub addr: SocketAddr,
    pub http_sink: Arc<MemorySink>,
    pub default_sink: Arc<MemorySink>,
}

impl Harness {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Instrumented app mounted at the root; resolved and original URLs agree.
pub async fn start_app() -> Harness {
    start(false, None).await
}

/// Instrumented app nested under `/mounted` without a configured base path,
/// so every request resolves to a different URL than the original.
pub async fn start_nested_app() -> Harness {
    start(true, None).await
}

/// Instrumented app nested under `/mounted` with the matching base path
/// configured, so resolution agrees with the original URL again.
pub async fn start_mounted_app() -> Harness {
    start(true, Some("/mounted")).await
}

async fn start(nested: bool, base_path: Option<&str>) -> Harness {
    let logger = Logger::new(Arc::new(LogRouter::new()));
    let http_sink = Arc::new(MemorySink::new(Severity::Silly));
    let default_sink = Arc::new(MemorySink::new(Severity::Silly));
    logger.router().register(Channel::Http, http_sink.clone());
    logger.router().register(Channel::Default, default_sink.clone());

    let mut config = LoggerConfig::default();
    if nested {
        // Lets tests check that suppression never applies to requests whose
        // resolved path disagrees with the original URL.
        config
            .suppressed_paths
            .push("/mounted/api/liveness_check".to_string());
    }
    let mut state = HttpLogState::new(logger, &config);
    if let Some(base_path) = base_path {
        state = state.with_base_path(base_path);
    }

    let routes = Router::new()
        .route("/api/hello", get(hello))
        .route("/api/liveness_check", get(probe))
        .route("/api/readiness_check", get(probe))
        .route("/api/fail", get(fail))
        .route("/api/auth/login", post(login))
        .layer(middleware::from_fn_with_state(state, http_log_middleware));

    let app = if nested {
        Router::new().nest("/mounted", routes)
    } else {
        routes
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    Harness {
        addr,
        http_sink,
        default_sink,
    }
}

/// Give the spawned emission task time to land in the capture sink.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "hello" }))
}

async fn probe() -> impl IntoResponse {
    StatusCode::OK
}

async fn fail() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "boom" })),
    )
}

async fn login(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    if body.get("email").is_some() {
        (StatusCode::OK, Json(json!({ "message": "welcome" })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "unknown user" })),
        )
    }
}

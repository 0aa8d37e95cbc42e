//! Demo service for the observability layer.
//!
//! Wires the logger facade and the access-log middleware around a small axum
//! application:
//! - `/api/hello` — plain JSON handler, logged at `info`
//! - `/api/liveness_check`, `/api/readiness_check` — suppressed probes
//! - `/api/auth/login` — audited login endpoint (identifier logged, password
//!   redacted)
//!
//! Configuration comes from the environment: `LOG_LEVEL`,
//! `ENVIRONMENT_PROFILE`, `REMOTE_LOG_STORE_URL`.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use log_relay::{http_log_middleware, HttpLogState, Logger, LoggerConfig, Metadata, Severity};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for the crate's own diagnostics
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "log_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoggerConfig::from_env();
    let logger = Logger::init(&config);

    tracing::info!(
        level = %config.level,
        profile = ?config.profile,
        remote_store = config.remote_store_url.is_some(),
        "Configuration loaded"
    );

    logger.log(Severity::Info, "log-relay demo service starting", Metadata::new());

    let state = HttpLogState::new(logger.clone(), &config);
    let app = Router::new()
        .route("/api/hello", get(hello))
        .route("/api/liveness_check", get(probe))
        .route("/api/readiness_check", get(probe))
        .route("/api/auth/login", post(login))
        .layer(middleware::from_fn_with_state(state, http_log_middleware))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "hello" }))
}

async fn probe() -> impl IntoResponse {
    StatusCode::OK
}

async fn login(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    let known = body.get("email").and_then(|email| email.as_str()).is_some();
    if known {
        (StatusCode::OK, Json(json!({ "message": "welcome" })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "unknown user" })),
        )
    }
}

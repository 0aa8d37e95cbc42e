//! Access-log middleware for axum.

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, OriginalUri, State},
    http::{header, HeaderMap, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::config::LoggerConfig;
use crate::entry::Metadata;
use crate::http::identity::decode_caller_identity;
use crate::http::latency::{monotonic_sample, Latency};
use crate::http::record::{classify_status, redact_body, HttpRequestRecord};
use crate::logger::Logger;
use crate::severity::Severity;
use crate::sinks::console::human_file_size;

/// Logger handle plus the per-install policy knobs.
///
/// `base_path` is the mount prefix when the instrumented router is nested;
/// the resolved URL (`base_path` + inner URI) must equal the original URL or
/// the request is treated as a routing rewrite and logged as 404.
#[derive(Clone)]
pub struct HttpLogState {
    pub logger: Logger,
    pub suppressed_paths: Vec<String>,
    pub login_path: String,
    pub base_path: String,
}

impl HttpLogState {
    pub fn new(logger: Logger, config: &LoggerConfig) -> Self {
        Self {
            logger,
            suppressed_paths: config.suppressed_paths.clone(),
            login_path: config.login_path.clone(),
            base_path: String::new(),
        }
    }

    /// Set the mount prefix for a nested install.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

/// Wrap one request/response cycle and emit a structured access record on
/// the http channel. Install with `axum::middleware::from_fn_with_state`.
///
/// The caller never observes an instrumentation failure; everything in here
/// degrades to sentinel or fallback values.
pub async fn http_log_middleware(
    State(state): State<HttpLogState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = monotonic_sample();

    let method = request.method().to_string();
    let inner_url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let original_url = request
        .extensions()
        .get::<OriginalUri>()
        .and_then(|uri| uri.0.path_and_query())
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| inner_url.clone());
    let user_agent = header_string(request.headers(), header::USER_AGENT);
    let authorization = header_string(request.headers(), header::AUTHORIZATION);
    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string());

    // Buffer the request payload for redaction and login auditing; the inner
    // service receives an equivalent body.
    let (parts, body) = request.into_parts();
    let request_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let request_json: Option<Value> = serde_json::from_slice(&request_bytes).ok();
    let request_size = request_bytes.len() as u64;
    let request = Request::from_parts(parts, Body::from(request_bytes));

    let response = next.run(request).await;

    // Buffer the response to observe its size and, best-effort, a top-level
    // "message" field. Parse failures are ignored.
    let (parts, body) = response.into_parts();
    let response_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let end = monotonic_sample();
    let json_message = serde_json::from_slice::<Value>(&response_bytes)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
        });
    let response_size = response_bytes.len() as u64;
    let handler_status = parts.status.as_u16();
    let response = Response::from_parts(parts, Body::from(response_bytes));

    let resolved_url = format!("{}{}", state.base_path, inner_url.replacen("/?", "?", 1));
    let mismatch = resolved_url != original_url;
    let suppressed = !mismatch
        && state
            .suppressed_paths
            .iter()
            .any(|path| path == &original_url);

    if !suppressed {
        // Emission runs after the response is assembled and never delays
        // delivery to the client.
        tokio::spawn(async move {
            emit_access_record(AccessContext {
                state,
                method,
                original_url,
                handler_status,
                mismatch,
                latency: Latency::between(start, end),
                user_agent,
                authorization,
                remote_ip,
                request_size,
                response_size,
                request_json,
                json_message,
            });
        });
    }

    response
}

struct AccessContext {
    state: HttpLogState,
    method: String,
    original_url: String,
    handler_status: u16,
    mismatch: bool,
    latency: Latency,
    user_agent: Option<String>,
    authorization: Option<String>,
    remote_ip: Option<String>,
    request_size: u64,
    response_size: u64,
    request_json: Option<Value>,
    json_message: Option<String>,
}

/// Build and route the access record. A resolved-route mismatch overrides
/// the handler status with 404 before classification.
fn emit_access_record(ctx: AccessContext) {
    let status = if ctx.mismatch { 404 } else { ctx.handler_status };
    let level: Severity = classify_status(status);

    let user = decode_caller_identity(ctx.authorization.as_deref()).into_value();
    let body = ctx
        .request_json
        .unwrap_or_else(|| Value::Object(Default::default()));
    let redacted = redact_body(&body);

    let record = HttpRequestRecord {
        request_method: ctx.method.clone(),
        request_url: ctx.original_url.clone(),
        status,
        latency: ctx.latency,
        user_agent: ctx.user_agent,
        remote_ip: ctx.remote_ip,
        request_size: ctx.request_size,
        response_size: ctx.response_size,
        request_body: (ctx.method == "POST").then(|| redacted.clone()),
    };

    let mut metadata = Metadata::new();
    metadata.insert("user".to_string(), user);
    if let Some(message) = ctx.json_message {
        metadata.insert("jsonMessage".to_string(), Value::String(message));
    }
    metadata.insert("requestBody".to_string(), redacted);
    match serde_json::to_value(&record) {
        Ok(value) => {
            metadata.insert("httpRequest".to_string(), value);
        }
        Err(error) => {
            tracing::warn!(%error, "access record serialization failed");
        }
    }
    if ctx.original_url == ctx.state.login_path {
        if let Some(identifier) = body.get("email") {
            metadata.insert("login_attempt_user".to_string(), identifier.clone());
        }
    }

    let message = format!(
        "{} {} {} {:.3} ms {}",
        ctx.method,
        status,
        human_file_size(ctx.response_size),
        ctx.latency.as_millis_f64(),
        ctx.original_url
    );
    ctx.state.logger.http(level, message, metadata);
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

//! The structured access record, status classification and redaction.

use serde::Serialize;
use serde_json::Value;

use crate::http::latency::Latency;
use crate::severity::Severity;

/// One HTTP request/response cycle, serialized camelCase for log backends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestRecord {
    pub request_method: String,
    pub request_url: String,
    pub status: u16,
    pub latency: Latency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_ip: Option<String>,
    pub request_size: u64,
    pub response_size: u64,
    /// Redacted request payload; attached for POST requests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
}

/// Fixed severity thresholds for status codes. Everything below 400,
/// including the whole 300-399 range, is informational.
pub fn classify_status(status: u16) -> Severity {
    if status >= 500 {
        Severity::Error
    } else if status >= 400 {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Clone of the body with any top-level `password` key removed,
/// unconditionally. Non-object bodies pass through untouched.
pub fn redact_body(body: &Value) -> Value {
    let mut clone = body.clone();
    if let Value::Object(object) = &mut clone {
        object.remove("password");
    }
    clone
}

//! Transport adapter — one outbound HTTP call per operation.
//!
//! [`Transport`] is the object-safe interface the orchestrator depends on;
//! [`HttpBackend`] is the production implementation over `reqwest`.
//!
//! The backend reports failures two ways and both are normalised into
//! [`TransportError`] here: transport-level failures (unreachable host,
//! non-2xx status, undecodable body) and domain failures carried in an
//! `error` field of an otherwise well-formed response body. A 2xx status is
//! therefore not sufficient to signal success.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::backend::payload::RequestPayload;
use crate::config::BackendConfig;

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failure reported by the backend inside a decodable response body.
    /// Carries the backend's own message verbatim.
    #[error("{0}")]
    Backend(String),

    /// Connection or protocol failure before a usable response arrived.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Non-success status with no structured error in the body.
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded as JSON.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for performing one backend call.
///
/// Implementations must be `Send + Sync` so the dispatcher can hold one
/// behind an `Arc<dyn Transport>` and call it from any task.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` to `endpoint` and return the decoded response body.
    ///
    /// The payload is consumed — file bytes are handed to the HTTP stack and
    /// never retained.
    async fn call(&self, endpoint: &str, payload: RequestPayload)
        -> Result<Value, TransportError>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// reqwest-based [`Transport`] talking to a fixed base address.
///
/// All connection details (`base_url`, `timeout_secs`) come from
/// [`BackendConfig`]; nothing is hardcoded. No retries — each call is
/// fire-once and the user re-triggers manually.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build an `HttpBackend` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured base address, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a relative media path (e.g. a text-to-speech `audio_url`)
    /// against the backend base address.
    pub fn media_url(&self, relative: &str) -> String {
        if relative.starts_with('/') {
            format!("{}{relative}", self.base_url)
        } else {
            format!("{}/{relative}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for HttpBackend {
    async fn call(
        &self,
        endpoint: &str,
        payload: RequestPayload,
    ) -> Result<Value, TransportError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let request = match payload {
            RequestPayload::Json(fields) => {
                self.client.post(&url).json(&Value::Object(fields))
            }
            RequestPayload::File { file, fields } => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name);
                let mut form = reqwest::multipart::Form::new().part("file", part);
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                // No explicit Content-Type header — reqwest derives it from
                // the form so the multipart boundary stays correct.
                self.client.post(&url).multipart(form)
            }
        };

        let response = request.send().await?;
        let status = response.status();

        let body: Value = match response.json().await {
            Ok(body) => body,
            // An error page that isn't JSON: report the status itself.
            Err(_) if !status.is_success() => {
                return Err(TransportError::Status(status.as_u16()))
            }
            Err(e) => return Err(TransportError::Decode(e.to_string())),
        };

        normalize(status, body)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a decoded response into the adapter's uniform result shape.
///
/// The backend's own message wins over the status code, in both directions:
/// a 2xx body carrying `error` is a domain failure, and a non-2xx body
/// carrying `error` gives the most specific message available.
fn normalize(status: reqwest::StatusCode, body: Value) -> Result<Value, TransportError> {
    if let Some(message) = body_error(&body) {
        return Err(TransportError::Backend(message));
    }

    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }

    Ok(body)
}

/// Extract a usable error message from a response body's top-level `error`
/// field. `null` and `""` count as "no error" — the backend sets those on
/// success.
fn body_error(body: &Value) -> Option<String> {
    match body.get("error") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        // A non-string error indicator still signals failure.
        Some(other) => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config(base_url: &str) -> BackendConfig {
        BackendConfig {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _backend = HttpBackend::from_config(&make_config("http://127.0.0.1:5000"));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let backend = HttpBackend::from_config(&make_config("http://127.0.0.1:5000/"));
        assert_eq!(backend.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn media_url_joins_relative_paths() {
        let backend = HttpBackend::from_config(&make_config("http://127.0.0.1:5000"));
        assert_eq!(
            backend.media_url("/audio/out.mp3"),
            "http://127.0.0.1:5000/audio/out.mp3"
        );
        assert_eq!(
            backend.media_url("audio/out.mp3"),
            "http://127.0.0.1:5000/audio/out.mp3"
        );
    }

    #[test]
    fn backend_is_object_safe() {
        let backend = HttpBackend::from_config(&make_config("http://127.0.0.1:5000"));
        let _: Box<dyn Transport> = Box::new(backend);
    }

    // ---- body_error ---

    #[test]
    fn body_error_absent_field_is_success() {
        assert_eq!(body_error(&json!({"translated_text": "Hola"})), None);
    }

    #[test]
    fn body_error_null_is_success() {
        assert_eq!(
            body_error(&json!({"translated_text": "Hola", "error": null})),
            None
        );
    }

    #[test]
    fn body_error_empty_string_is_success() {
        assert_eq!(body_error(&json!({"error": ""})), None);
    }

    #[test]
    fn body_error_message_is_returned() {
        assert_eq!(
            body_error(&json!({"error": "quota exceeded"})),
            Some("quota exceeded".into())
        );
    }

    #[test]
    fn body_error_non_string_indicator_still_fails() {
        assert_eq!(body_error(&json!({"error": true})), Some("true".into()));
    }

    // ---- normalize ---

    #[test]
    fn domain_error_overrides_http_success() {
        let result = normalize(
            reqwest::StatusCode::OK,
            json!({"error": "quota exceeded"}),
        );
        match result {
            Err(TransportError::Backend(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected Backend error, got {other:?}"),
        }
    }

    #[test]
    fn clean_success_body_passes_through() {
        let body = json!({"translated_text": "Hola", "error": null});
        let result = normalize(reqwest::StatusCode::OK, body.clone());
        assert_eq!(result.unwrap(), body);
    }

    #[test]
    fn error_body_on_failure_status_gives_the_specific_message() {
        let result = normalize(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Missing text or target_language"}),
        );
        match result {
            Err(TransportError::Backend(message)) => {
                assert_eq!(message, "Missing text or target_language");
            }
            other => panic!("expected Backend error, got {other:?}"),
        }
    }

    #[test]
    fn failure_status_without_error_body_reports_the_status() {
        let result = normalize(reqwest::StatusCode::BAD_GATEWAY, json!({}));
        match result {
            Err(TransportError::Status(code)) => assert_eq!(code, 502),
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    // ---- TransportError display ---

    #[test]
    fn backend_error_displays_message_verbatim() {
        let err = TransportError::Backend("quota exceeded".into());
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn status_error_names_the_code() {
        let err = TransportError::Status(503);
        assert_eq!(err.to_string(), "backend returned HTTP 503");
    }
}

//! Request dispatcher — drives one operation through its lifecycle.
//!
//! [`Dispatcher::dispatch`] is the single entry point the front-end calls:
//!
//! ```text
//! dispatch(key, inputs)
//!   ├─ build payload from inputs + registry      ── missing text/file
//!   │                                               └─▶ Failed (no network call)
//!   ├─ Started                                   [Pending]
//!   ├─ Transport::call(endpoint, payload)        ── suspends here
//!   ├─ Ok(body) with success field present       ──▶ Succeeded(full body)
//!   ├─ Ok(body) missing the success field        ──▶ Failed("response missing …")
//!   └─ Err(e)                                    ──▶ Failed(e.to_string())
//! ```
//!
//! Dispatches for different keys run as independent tasks and may complete
//! in any order; each writes only its own key's slot. The dispatcher does
//! not serialise re-entrant dispatches for the same key — the front-end
//! disables re-triggering while a key [`is_pending`](Dispatcher::is_pending),
//! and if a second dispatch does slip through, the last write to the store
//! wins. There is no cancellation: a stale response simply overwrites.

use std::sync::Arc;

use serde_json::Value;

use crate::backend::{OperationKey, PayloadKind, RequestPayload, Transport, UploadFile};
use crate::config::LanguageDefaults;

use super::store::{OperationState, SharedStore, TransitionEvent};

// ---------------------------------------------------------------------------
// OperationInputs
// ---------------------------------------------------------------------------

/// The primitive inputs the front-end hands over for one dispatch.
///
/// All fields are optional; [`dispatch`](Dispatcher::dispatch) validates the
/// combination against the operation's payload kind and fills language
/// fields from [`LanguageDefaults`] when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationInputs {
    /// Free-form text (detect / translate / text-to-speech).
    pub text: Option<String>,
    /// Translation target language code, e.g. `fr`.
    pub target_language: Option<String>,
    /// Voice or recognition locale, e.g. `en-US`.
    pub language_code: Option<String>,
    /// File to upload (speech-to-text / image caption).
    pub file: Option<UploadFile>,
}

impl OperationInputs {
    /// Inputs carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Inputs carrying only a file.
    pub fn file(file: UploadFile) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn with_target_language(mut self, code: impl Into<String>) -> Self {
        self.target_language = Some(code.into());
        self
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Drives operations against the backend and records their outcomes in the
/// shared store.
///
/// Cheap to clone — every field is an `Arc` or small value — so the
/// front-end can move a clone into each spawned dispatch task.
#[derive(Clone)]
pub struct Dispatcher {
    store: SharedStore,
    transport: Arc<dyn Transport>,
    defaults: LanguageDefaults,
}

impl Dispatcher {
    /// Create a dispatcher.
    ///
    /// # Arguments
    ///
    /// * `store`     — shared per-operation state (also read by the front-end).
    /// * `transport` — backend transport (e.g. [`HttpBackend`](crate::backend::HttpBackend)).
    /// * `defaults`  — language codes used when the caller omits one.
    pub fn new(store: SharedStore, transport: Arc<dyn Transport>, defaults: LanguageDefaults) -> Self {
        Self {
            store,
            transport,
            defaults,
        }
    }

    /// The shared store this dispatcher writes into.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// A side-effect-free copy of `key`'s current record.
    pub fn snapshot(&self, key: OperationKey) -> OperationState {
        self.store.lock().unwrap().snapshot(key)
    }

    /// Returns `true` while `key` has a request in flight. The front-end
    /// checks this before re-triggering so each key stays single-flight.
    pub fn is_pending(&self, key: OperationKey) -> bool {
        self.store.lock().unwrap().is_pending(key)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Run `key` once with `inputs`. No return value — the outcome lands in
    /// the store.
    pub async fn dispatch(&self, key: OperationKey, inputs: OperationInputs) {
        let payload = match build_payload(key, inputs, &self.defaults) {
            Ok(payload) => payload,
            Err(message) => {
                // Precondition failure — the transport is never invoked.
                log::warn!("dispatch: {key:?} rejected: {message}");
                self.transition(key, TransitionEvent::Failed(message));
                return;
            }
        };

        self.transition(key, TransitionEvent::Started);
        log::debug!("dispatch: {key:?} → POST /{}", key.endpoint());

        match self.transport.call(key.endpoint(), payload).await {
            Ok(body) => {
                // Validate the response shape the registry declares before
                // the store (and the chains reading it) ever see the body.
                let field = key.result_field();
                if body.get(field).map_or(true, Value::is_null) {
                    let message = format!("response missing \"{field}\"");
                    log::warn!("dispatch: {key:?} {message}");
                    self.transition(key, TransitionEvent::Failed(message));
                    return;
                }

                log::debug!("dispatch: {key:?} succeeded");
                // The full body is stored, not just the success field —
                // auxiliary fields like a confidence score stay readable.
                self.transition(key, TransitionEvent::Succeeded(body));
            }
            Err(e) => {
                log::error!("dispatch: {key:?} failed: {e}");
                self.transition(key, TransitionEvent::Failed(e.to_string()));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    pub(super) fn transition(&self, key: OperationKey, event: TransitionEvent) {
        self.store.lock().unwrap().transition(key, event);
    }

    pub(super) fn defaults(&self) -> &LanguageDefaults {
        &self.defaults
    }
}

// ---------------------------------------------------------------------------
// Payload construction
// ---------------------------------------------------------------------------

/// Build the wire payload for `key`, or a human-readable precondition
/// message when a required input is absent.
fn build_payload(
    key: OperationKey,
    inputs: OperationInputs,
    defaults: &LanguageDefaults,
) -> Result<RequestPayload, String> {
    match key.payload_kind() {
        PayloadKind::Json => {
            let text = match inputs.text.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => return Err("no text provided".into()),
            };

            let payload = match key {
                OperationKey::DetectLanguage => RequestPayload::json([("text", text.as_str())]),
                OperationKey::Translate | OperationKey::TranslateTranscript => {
                    let target = inputs
                        .target_language
                        .unwrap_or_else(|| defaults.target_language.clone());
                    RequestPayload::json([
                        ("text", text.as_str()),
                        ("target_language", target.as_str()),
                    ])
                }
                OperationKey::TextToSpeech => {
                    let voice = inputs
                        .language_code
                        .unwrap_or_else(|| defaults.target_language.clone());
                    RequestPayload::json([
                        ("text", text.as_str()),
                        ("language_code", voice.as_str()),
                    ])
                }
                // File-kind keys are handled in the other arm.
                OperationKey::SpeechToText | OperationKey::ImageCaption => unreachable!(),
            };
            Ok(payload)
        }

        PayloadKind::File => {
            let file = inputs.file.ok_or_else(|| "no file selected".to_string())?;

            let payload = match key {
                OperationKey::SpeechToText => {
                    // The language_code field is always attached — the
                    // backend otherwise guesses the recognition locale.
                    let locale = inputs
                        .language_code
                        .unwrap_or_else(|| defaults.stt_locale.clone());
                    RequestPayload::file(file, [("language_code", locale.as_str())])
                }
                OperationKey::ImageCaption => RequestPayload::file(file, []),
                _ => unreachable!(),
            };
            Ok(payload)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

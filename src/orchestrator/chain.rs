//! Chained operations — one operation's result feeding another's input.
//!
//! Two flows exist:
//!
//! * **speak translated** — `Translate` result → `TextToSpeech` input;
//! * **translate transcript** — `SpeechToText` result → `TranslateTranscript`
//!   input.
//!
//! Each is a guard plus a payload derivation, evaluated lazily at the moment
//! the user triggers the chain (never cached — the source slot is re-read
//! every time). When the guard fails the dependent key is moved straight to
//! Failed with an explanatory message and the transport is never invoked.

use crate::backend::OperationKey;

use super::dispatcher::{Dispatcher, OperationInputs};
use super::store::{OperationStatus, TransitionEvent};

/// Message recorded on `TextToSpeech` when no translation is available yet.
pub const SPEAK_NEEDS_TRANSLATION: &str = "source text missing; translate first";

/// Message recorded on `TranslateTranscript` when no transcript is available.
pub const TRANSLATE_NEEDS_TRANSCRIPT: &str = "no transcript available; transcribe first";

impl Dispatcher {
    /// Speak the current translation.
    ///
    /// Requires `Translate` to have Succeeded with a non-null
    /// `translated_text`; derives the TextToSpeech inputs
    /// `{text: translated_text, language_code}` where `language_code` is the
    /// translation's target language (the voice should match the language
    /// the text was translated into).
    pub async fn speak_translated(&self, language_code: &str) {
        let source = self.chain_source(OperationKey::Translate, "translated_text");

        match source {
            Some(text) => {
                let inputs = OperationInputs::text(text).with_language_code(language_code);
                self.dispatch(OperationKey::TextToSpeech, inputs).await;
            }
            None => {
                log::warn!("chain: speak refused — no translation available");
                self.transition(
                    OperationKey::TextToSpeech,
                    TransitionEvent::Failed(SPEAK_NEEDS_TRANSLATION.into()),
                );
            }
        }
    }

    /// Translate the current transcript.
    ///
    /// Requires `SpeechToText` to have Succeeded with a non-null
    /// `transcript`; derives the TranslateTranscript inputs
    /// `{text: transcript, target_language}`. Uses the configured transcript
    /// target when `target_language` is `None`.
    pub async fn translate_transcript(&self, target_language: Option<&str>) {
        let source = self.chain_source(OperationKey::SpeechToText, "transcript");

        match source {
            Some(text) => {
                let target = target_language
                    .map(str::to_string)
                    .unwrap_or_else(|| self.defaults().transcript_target.clone());
                let inputs = OperationInputs::text(text).with_target_language(target);
                self.dispatch(OperationKey::TranslateTranscript, inputs).await;
            }
            None => {
                log::warn!("chain: transcript translation refused — no transcript available");
                self.transition(
                    OperationKey::TranslateTranscript,
                    TransitionEvent::Failed(TRANSLATE_NEEDS_TRANSCRIPT.into()),
                );
            }
        }
    }

    /// Read `field` out of `key`'s slot if that operation has Succeeded.
    ///
    /// Returns an owned copy so no store lock is held while the dependent
    /// dispatch awaits the network.
    fn chain_source(&self, key: OperationKey, field: &str) -> Option<String> {
        let snapshot = self.snapshot(key);
        if snapshot.status != OperationStatus::Succeeded {
            return None;
        }
        snapshot.result_str(field).map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RequestPayload, Transport, TransportError};
    use crate::config::LanguageDefaults;
    use crate::orchestrator::store::new_shared_store;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Mock transport recording calls and answering with a fixed body.
    struct FixedTransport {
        calls: Mutex<Vec<(String, RequestPayload)>>,
        body: Value,
    }

    impl FixedTransport {
        fn new(body: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                body,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_call(&self) -> (String, RequestPayload) {
            self.calls.lock().unwrap().last().cloned().expect("no calls recorded")
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn call(
            &self,
            endpoint: &str,
            payload: RequestPayload,
        ) -> Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), payload));
            Ok(self.body.clone())
        }
    }

    fn make_dispatcher(transport: Arc<FixedTransport>) -> Dispatcher {
        Dispatcher::new(new_shared_store(), transport, LanguageDefaults::default())
    }

    /// Seed `key` as Succeeded with `body`, as if a dispatch had completed.
    fn seed_success(dispatcher: &Dispatcher, key: OperationKey, body: Value) {
        let store = dispatcher.store();
        let mut store = store.lock().unwrap();
        store.transition(key, TransitionEvent::Started);
        store.transition(key, TransitionEvent::Succeeded(body));
    }

    // -----------------------------------------------------------------------
    // speak_translated
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn speak_is_refused_before_a_translation_exists() {
        let transport = FixedTransport::new(json!({"audio_url": "/audio/out.mp3"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));

        dispatcher.speak_translated("fr").await;

        let snap = dispatcher.snapshot(OperationKey::TextToSpeech);
        assert_eq!(snap.status, OperationStatus::Failed);
        assert_eq!(snap.error.as_deref(), Some(SPEAK_NEEDS_TRANSLATION));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn speak_is_refused_while_translate_only_failed() {
        let transport = FixedTransport::new(json!({"audio_url": "/audio/out.mp3"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));
        dispatcher.transition(
            OperationKey::Translate,
            TransitionEvent::Failed("boom".into()),
        );

        dispatcher.speak_translated("fr").await;

        assert_eq!(
            dispatcher.snapshot(OperationKey::TextToSpeech).status,
            OperationStatus::Failed
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn speak_derives_text_and_voice_from_the_translation() {
        let transport = FixedTransport::new(json!({"audio_url": "/audio/out.mp3"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));
        seed_success(
            &dispatcher,
            OperationKey::Translate,
            json!({"translated_text": "Bonjour", "error": null}),
        );

        dispatcher.speak_translated("fr").await;

        let (endpoint, payload) = transport.last_call();
        assert_eq!(endpoint, "text-to-speech");
        match payload {
            RequestPayload::Json(map) => {
                assert_eq!(map["text"], "Bonjour");
                assert_eq!(map["language_code"], "fr");
            }
            other => panic!("expected Json payload, got {other:?}"),
        }

        let snap = dispatcher.snapshot(OperationKey::TextToSpeech);
        assert_eq!(snap.status, OperationStatus::Succeeded);
        assert_eq!(snap.result_str("audio_url"), Some("/audio/out.mp3"));
    }

    /// The guard re-reads the source slot every trigger — a translation that
    /// arrived after a refused attempt makes the next attempt succeed.
    #[tokio::test]
    async fn speak_guard_is_evaluated_lazily() {
        let transport = FixedTransport::new(json!({"audio_url": "/audio/out.mp3"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));

        dispatcher.speak_translated("es").await;
        assert_eq!(transport.call_count(), 0);

        seed_success(
            &dispatcher,
            OperationKey::Translate,
            json!({"translated_text": "Hola"}),
        );
        dispatcher.speak_translated("es").await;

        assert_eq!(transport.call_count(), 1);
        assert_eq!(
            dispatcher.snapshot(OperationKey::TextToSpeech).status,
            OperationStatus::Succeeded
        );
    }

    // -----------------------------------------------------------------------
    // translate_transcript
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn transcript_translation_is_refused_without_a_transcript() {
        let transport = FixedTransport::new(json!({"translated_text": "Bonjour"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));

        dispatcher.translate_transcript(Some("fr")).await;

        let snap = dispatcher.snapshot(OperationKey::TranslateTranscript);
        assert_eq!(snap.status, OperationStatus::Failed);
        assert_eq!(snap.error.as_deref(), Some(TRANSLATE_NEEDS_TRANSCRIPT));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn transcript_translation_derives_text_and_target() {
        let transport = FixedTransport::new(json!({"translated_text": "Bonjour tout le monde"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));
        seed_success(
            &dispatcher,
            OperationKey::SpeechToText,
            json!({"transcript": "hello everyone"}),
        );

        dispatcher.translate_transcript(Some("fr")).await;

        let (endpoint, payload) = transport.last_call();
        assert_eq!(endpoint, "translate");
        match payload {
            RequestPayload::Json(map) => {
                assert_eq!(map["text"], "hello everyone");
                assert_eq!(map["target_language"], "fr");
            }
            other => panic!("expected Json payload, got {other:?}"),
        }

        // The result lands under its own key; plain Translate stays Idle.
        assert_eq!(
            dispatcher.snapshot(OperationKey::TranslateTranscript).status,
            OperationStatus::Succeeded
        );
        assert_eq!(
            dispatcher.snapshot(OperationKey::Translate).status,
            OperationStatus::Idle
        );
    }

    #[tokio::test]
    async fn transcript_translation_uses_the_configured_default_target() {
        let transport = FixedTransport::new(json!({"translated_text": "Bonjour"}));
        let dispatcher = make_dispatcher(Arc::clone(&transport));
        seed_success(
            &dispatcher,
            OperationKey::SpeechToText,
            json!({"transcript": "hello"}),
        );

        dispatcher.translate_transcript(None).await;

        match transport.last_call().1 {
            // LanguageDefaults::default().transcript_target is "fr".
            RequestPayload::Json(map) => assert_eq!(map["target_language"], "fr"),
            other => panic!("expected Json payload, got {other:?}"),
        }
    }
}

//! Static registry of backend operations.
//!
//! [`OperationKey`] enumerates the fixed set of capabilities the backend
//! exposes. Each key maps to an endpoint, a payload kind, and the field
//! under which the backend reports success:
//!
//! | key | endpoint | payload | success field |
//! |-----|----------|---------|---------------|
//! | `DetectLanguage` | `detect-language` | Json | `detected_language` |
//! | `Translate` | `translate` | Json | `translated_text` |
//! | `TextToSpeech` | `text-to-speech` | Json | `audio_url` |
//! | `SpeechToText` | `speech-to-text` | File | `transcript` |
//! | `ImageCaption` | `image-captioning` | File | `caption` |
//! | `TranslateTranscript` | `translate` | Json | `translated_text` |
//!
//! `TranslateTranscript` shares the translate endpoint but is tracked as its
//! own key so translating a transcript never clobbers the state of a plain
//! text translation.

use crate::backend::payload::PayloadKind;

// ---------------------------------------------------------------------------
// OperationKey
// ---------------------------------------------------------------------------

/// One of the backend's fixed capabilities.
///
/// Used as the index into the per-operation state store; `Copy + Eq + Hash`
/// so it works as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKey {
    /// Detect the language of free-form text.
    DetectLanguage,
    /// Translate free-form text into a target language.
    Translate,
    /// Synthesize speech from text; the result is a relative audio URL.
    TextToSpeech,
    /// Transcribe an uploaded audio file.
    SpeechToText,
    /// Caption an uploaded image.
    ImageCaption,
    /// Translate a transcript produced by `SpeechToText`.
    TranslateTranscript,
}

impl OperationKey {
    /// Every operation key, in display order.
    pub const ALL: [OperationKey; 6] = [
        OperationKey::DetectLanguage,
        OperationKey::Translate,
        OperationKey::TextToSpeech,
        OperationKey::SpeechToText,
        OperationKey::ImageCaption,
        OperationKey::TranslateTranscript,
    ];

    /// Endpoint path relative to the backend base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            OperationKey::DetectLanguage => "detect-language",
            OperationKey::Translate => "translate",
            OperationKey::TextToSpeech => "text-to-speech",
            OperationKey::SpeechToText => "speech-to-text",
            OperationKey::ImageCaption => "image-captioning",
            OperationKey::TranslateTranscript => "translate",
        }
    }

    /// Whether the operation posts a JSON body or a multipart file upload.
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            OperationKey::DetectLanguage
            | OperationKey::Translate
            | OperationKey::TextToSpeech
            | OperationKey::TranslateTranscript => PayloadKind::Json,
            OperationKey::SpeechToText | OperationKey::ImageCaption => PayloadKind::File,
        }
    }

    /// The response-body field that carries the operation's result.
    pub fn result_field(&self) -> &'static str {
        match self {
            OperationKey::DetectLanguage => "detected_language",
            OperationKey::Translate | OperationKey::TranslateTranscript => "translated_text",
            OperationKey::TextToSpeech => "audio_url",
            OperationKey::SpeechToText => "transcript",
            OperationKey::ImageCaption => "caption",
        }
    }

    /// A short human-readable label suitable for the front-end.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKey::DetectLanguage => "Detect Language",
            OperationKey::Translate => "Translate",
            OperationKey::TextToSpeech => "Text to Speech",
            OperationKey::SpeechToText => "Speech to Text",
            OperationKey::ImageCaption => "Image Caption",
            OperationKey::TranslateTranscript => "Translate Transcript",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_table_matches_backend_routes() {
        assert_eq!(OperationKey::DetectLanguage.endpoint(), "detect-language");
        assert_eq!(OperationKey::Translate.endpoint(), "translate");
        assert_eq!(OperationKey::TextToSpeech.endpoint(), "text-to-speech");
        assert_eq!(OperationKey::SpeechToText.endpoint(), "speech-to-text");
        assert_eq!(OperationKey::ImageCaption.endpoint(), "image-captioning");
    }

    #[test]
    fn translate_transcript_shares_the_translate_endpoint() {
        assert_eq!(
            OperationKey::TranslateTranscript.endpoint(),
            OperationKey::Translate.endpoint()
        );
        assert_eq!(
            OperationKey::TranslateTranscript.result_field(),
            OperationKey::Translate.result_field()
        );
        // but the keys themselves stay distinct
        assert_ne!(OperationKey::TranslateTranscript, OperationKey::Translate);
    }

    #[test]
    fn uploads_are_file_payloads_everything_else_is_json() {
        for key in OperationKey::ALL {
            let expected = match key {
                OperationKey::SpeechToText | OperationKey::ImageCaption => PayloadKind::File,
                _ => PayloadKind::Json,
            };
            assert_eq!(key.payload_kind(), expected, "{key:?}");
        }
    }

    #[test]
    fn result_fields_match_response_shapes() {
        assert_eq!(
            OperationKey::DetectLanguage.result_field(),
            "detected_language"
        );
        assert_eq!(OperationKey::Translate.result_field(), "translated_text");
        assert_eq!(OperationKey::TextToSpeech.result_field(), "audio_url");
        assert_eq!(OperationKey::SpeechToText.result_field(), "transcript");
        assert_eq!(OperationKey::ImageCaption.result_field(), "caption");
    }

    #[test]
    fn all_lists_each_key_exactly_once() {
        for key in OperationKey::ALL {
            let count = OperationKey::ALL.iter().filter(|k| **k == key).count();
            assert_eq!(count, 1, "{key:?} listed {count} times");
        }
        assert_eq!(OperationKey::ALL.len(), 6);
    }

    #[test]
    fn labels_are_non_empty() {
        for key in OperationKey::ALL {
            assert!(!key.label().is_empty(), "{key:?}");
        }
    }
}

//! Fixed language lists offered by the front-end.
//!
//! Two closed enumerations, matching what the backend's upstream services
//! accept: [`TRANSLATE_TARGETS`] (translation and speech-synthesis targets,
//! bare ISO codes) and [`STT_LOCALES`] (speech-recognition source locales,
//! region-qualified). These are configuration data consumed by the
//! front-end; the dispatcher itself forwards whatever code it is given and
//! lets the backend report unsupported ones.

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// One selectable language: wire code plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Code sent to the backend, e.g. `fr` or `fr-FR`.
    pub code: &'static str,
    /// Name shown to the user.
    pub name: &'static str,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Targets accepted for translation and text-to-speech.
pub const TRANSLATE_TARGETS: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "zh-CN", name: "Chinese (Simplified)" },
    Language { code: "ko", name: "Korean" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "it", name: "Italian" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "sv", name: "Swedish" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "vi", name: "Vietnamese" },
];

/// Source locales accepted for speech recognition.
pub const STT_LOCALES: &[Language] = &[
    Language { code: "en-US", name: "English (US)" },
    Language { code: "en-GB", name: "English (UK)" },
    Language { code: "es-ES", name: "Spanish (Spain)" },
    Language { code: "es-MX", name: "Spanish (Mexico)" },
    Language { code: "fr-FR", name: "French (France)" },
    Language { code: "de-DE", name: "German (Germany)" },
    Language { code: "hi-IN", name: "Hindi (India)" },
    Language { code: "ja-JP", name: "Japanese (Japan)" },
    Language { code: "ar-XA", name: "Arabic (Modern Standard)" },
    Language { code: "bn-IN", name: "Bengali (India)" },
    Language { code: "cmn-Hans-CN", name: "Chinese (Mandarin, Simplified)" },
    Language { code: "ko-KR", name: "Korean (South Korea)" },
    Language { code: "pt-BR", name: "Portuguese (Brazil)" },
    Language { code: "ru-RU", name: "Russian (Russia)" },
    Language { code: "it-IT", name: "Italian (Italy)" },
    Language { code: "id-ID", name: "Indonesian (Indonesia)" },
    Language { code: "nl-NL", name: "Dutch (Netherlands)" },
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Find a language by code in `list`.
pub fn find(list: &'static [Language], code: &str) -> Option<Language> {
    list.iter().copied().find(|lang| lang.code == code)
}

/// Whether `code` is a known translation/TTS target.
pub fn is_translate_target(code: &str) -> bool {
    find(TRANSLATE_TARGETS, code).is_some()
}

/// Whether `code` is a known speech-recognition locale.
pub fn is_stt_locale(code: &str) -> bool {
    find(STT_LOCALES, code).is_some()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Request payload descriptors.
//!
//! Every backend call carries either a JSON body or a multipart body (one
//! binary file part plus scalar text fields). The payload is built by the
//! caller and consumed exactly once by the transport — file bytes are never
//! retained beyond the single call that uploads them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// UploadFile
// ---------------------------------------------------------------------------

/// A file the user selected for upload (audio clip or image).
///
/// The front-end reads the file into memory and hands it over; the name is
/// kept so the backend can sniff the format from the extension.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// Original file name, e.g. `recording.wav`.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadKind
// ---------------------------------------------------------------------------

/// Which body shape an operation expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Structured JSON body.
    Json,
    /// Multipart body: a `file` part plus scalar text fields.
    File,
}

// ---------------------------------------------------------------------------
// RequestPayload
// ---------------------------------------------------------------------------

/// Body for one backend call.
///
/// `Json` maps to a `Content-Type: application/json` POST; `File` maps to a
/// multipart POST whose content type (and boundary) the HTTP stack derives
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    /// JSON object body.
    Json(Map<String, Value>),
    /// Binary file plus accompanying scalar fields (e.g. a `language_code`
    /// next to an audio upload).
    File {
        file: UploadFile,
        fields: BTreeMap<String, String>,
    },
}

impl RequestPayload {
    /// Build a JSON payload from `(key, value)` string pairs.
    pub fn json<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = Map::new();
        for (key, value) in fields {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        RequestPayload::Json(map)
    }

    /// Build a multipart payload from a file and `(key, value)` string pairs.
    pub fn file<'a>(
        file: UploadFile,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        RequestPayload::File {
            file,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// The body shape of this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            RequestPayload::Json(_) => PayloadKind::Json,
            RequestPayload::File { .. } => PayloadKind::File,
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
    fn json_constructor_sets_fields() {
        let payload = RequestPayload::json([("text", "hello"), ("target_language", "fr")]);
        match &payload {
            RequestPayload::Json(map) => {
                assert_eq!(map["text"], "hello");
                assert_eq!(map["target_language"], "fr");
                assert_eq!(map.len(), 2);
            }
            other => panic!("expected Json payload, got {other:?}"),
        }
        assert_eq!(payload.kind(), PayloadKind::Json);
    }

    #[test]
    fn file_constructor_keeps_bytes_and_fields() {
        let file = UploadFile::new("clip.wav", vec![1, 2, 3]);
        let payload = RequestPayload::file(file, [("language_code", "en-US")]);
        match &payload {
            RequestPayload::File { file, fields } => {
                assert_eq!(file.file_name, "clip.wav");
                assert_eq!(file.bytes, vec![1, 2, 3]);
                assert_eq!(fields["language_code"], "en-US");
            }
            other => panic!("expected File payload, got {other:?}"),
        }
        assert_eq!(payload.kind(), PayloadKind::File);
    }

    #[test]
    fn file_payload_without_fields_is_valid() {
        let payload = RequestPayload::file(UploadFile::new("photo.png", vec![0xFF]), []);
        match payload {
            RequestPayload::File { fields, .. } => assert!(fields.is_empty()),
            other => panic!("expected File payload, got {other:?}"),
        }
    }
}

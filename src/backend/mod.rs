//! Wire layer for the multi-modal language backend.
//!
//! This module provides:
//! * [`OperationKey`] — the closed set of backend operations and their
//!   static endpoint / payload-kind / success-field table.
//! * [`RequestPayload`] / [`UploadFile`] — JSON vs multipart payload
//!   descriptors, consumed exactly once per call.
//! * [`Transport`] — object-safe async trait performing one outbound call.
//! * [`HttpBackend`] — reqwest-based production transport.
//! * [`TransportError`] — error variants for the wire layer.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use translate_studio::backend::{HttpBackend, OperationKey, RequestPayload, Transport};
//! use translate_studio::config::BackendConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HttpBackend::from_config(&BackendConfig::default());
//!
//!     let mut fields = serde_json::Map::new();
//!     fields.insert("text".into(), "Bonjour le monde".into());
//!
//!     let key = OperationKey::DetectLanguage;
//!     let body = backend
//!         .call(key.endpoint(), RequestPayload::Json(fields))
//!         .await
//!         .unwrap();
//!     println!("{}", body[key.result_field()]);
//! }
//! ```

pub mod payload;
pub mod registry;
pub mod transport;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use payload::{PayloadKind, RequestPayload, UploadFile};
pub use registry::OperationKey;
pub use transport::{HttpBackend, Transport, TransportError};

//! Orchestration layer — per-operation state and the dispatch flow.
//!
//! # Architecture
//!
//! ```text
//! front-end command (text / file / language code)
//!        │
//!        ▼
//! Dispatcher::dispatch(key, inputs)      ← one independent tokio task each
//!        │
//!        ├─ missing input → Failed(message)            (no network call)
//!        ├─ Started                                    [Pending]
//!        ├─ Transport::call(endpoint, payload)         ── suspends
//!        └─ Succeeded(full body) | Failed(message)
//!
//! StateStore (Arc<Mutex<…>>, one slot per OperationKey)
//!        ▲
//!        └─── snapshot(key) read by the front-end to render
//! ```
//!
//! Chained flows (`speak_translated`, `translate_transcript`) live in
//! [`chain`]: they re-read the source slot at trigger time, derive the next
//! payload from it, and refuse with a direct Failed transition when the
//! source operation has not succeeded yet.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use translate_studio::backend::{HttpBackend, OperationKey};
//! use translate_studio::config::AppConfig;
//! use translate_studio::orchestrator::{new_shared_store, Dispatcher, OperationInputs};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let backend = Arc::new(HttpBackend::from_config(&config.backend));
//!     let dispatcher = Dispatcher::new(new_shared_store(), backend, config.languages);
//!
//!     let inputs = OperationInputs::text("Bonjour le monde");
//!     dispatcher.dispatch(OperationKey::DetectLanguage, inputs).await;
//!
//!     let snap = dispatcher.snapshot(OperationKey::DetectLanguage);
//!     println!("{:?}: {:?}", snap.status, snap.result);
//! }
//! ```

pub mod chain;
pub mod dispatcher;
pub mod store;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use chain::{SPEAK_NEEDS_TRANSLATION, TRANSLATE_NEEDS_TRANSCRIPT};
pub use dispatcher::{Dispatcher, OperationInputs};
pub use store::{
    new_shared_store, OperationState, OperationStatus, SharedStore, StateStore, TransitionEvent,
};

//! translate-studio — client-side orchestration for a multi-modal language
//! backend.
//!
//! The backend exposes five capabilities over plain HTTP POST: language
//! detection, text translation, text-to-speech, speech-to-text, and image
//! captioning. This crate drives them as independent, user-triggered
//! asynchronous operations:
//!
//! * [`backend`] — the wire layer: operation registry (endpoints, payload
//!   kinds, success fields), JSON/multipart payload descriptors, and the
//!   [`Transport`](backend::Transport) adapter over reqwest.
//! * [`orchestrator`] — the state layer: a per-operation
//!   [`StateStore`](orchestrator::StateStore) with atomic keyed transitions,
//!   the [`Dispatcher`](orchestrator::Dispatcher) driving each operation
//!   through pending → succeeded/failed, and the two chained flows
//!   (speak-after-translate, translate-after-transcribe).
//! * [`config`] — settings with TOML persistence, platform paths, and the
//!   fixed language lists offered by the front-end.
//!
//! The front-end (see `main.rs`) only ever hands the dispatcher primitive
//! inputs — text, a file read from disk, a language code — and renders
//! whatever the store last recorded for each operation.

pub mod backend;
pub mod config;
pub mod orchestrator;

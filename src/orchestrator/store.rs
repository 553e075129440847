//! Per-operation state store.
//!
//! Each [`OperationKey`](crate::backend::OperationKey) owns an independent
//! [`OperationState`] record:
//!
//! ```text
//! Idle ──Started──▶ Pending ──Succeeded(body)──▶ Succeeded {result}
//!                           ──Failed(message)──▶ Failed {error}
//! any state ──Started──▶ Pending   (user re-trigger overwrites the slot)
//! ```
//!
//! Writes are key-scoped: a transition on one key never touches another
//! key's record, so a failed caption can never disturb a translation in
//! flight. The front-end reads via [`StateStore::snapshot`], a pure clone.
//!
//! [`SharedStore`] is a type alias for `Arc<Mutex<StateStore>>` — cheap to
//! clone and safe to share across tasks. Lock for short critical sections
//! only; never hold the lock across an `.await` point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::backend::OperationKey;

// ---------------------------------------------------------------------------
// OperationStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of one operation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    /// Never dispatched (or reset); nothing to show.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last dispatch completed and a result body is available.
    Succeeded,
    /// The last dispatch failed and an error message is available.
    Failed,
}

impl OperationStatus {
    /// Returns `true` while a request is in flight.
    ///
    /// The front-end uses this to disable the trigger for the operation so
    /// only one request per key is outstanding at a time.
    pub fn is_busy(&self) -> bool {
        matches!(self, OperationStatus::Pending)
    }

    /// A short human-readable label for the front-end status display.
    pub fn label(&self) -> &'static str {
        match self {
            OperationStatus::Idle => "Idle",
            OperationStatus::Pending => "Loading",
            OperationStatus::Succeeded => "Done",
            OperationStatus::Failed => "Error",
        }
    }
}

impl Default for OperationStatus {
    fn default() -> Self {
        OperationStatus::Idle
    }
}

// ---------------------------------------------------------------------------
// OperationState
// ---------------------------------------------------------------------------

/// One operation's record: status plus at most one of result / error.
///
/// `result` holds the full decoded response body (not just the success
/// field) so the front-end can read auxiliary fields like a detection
/// confidence score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationState {
    pub status: OperationStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl OperationState {
    /// Read a string field out of the result body, if present.
    pub fn result_str(&self, field: &str) -> Option<&str> {
        self.result.as_ref()?.get(field)?.as_str()
    }
}

// ---------------------------------------------------------------------------
// TransitionEvent
// ---------------------------------------------------------------------------

/// Events that drive one slot's lifecycle.
#[derive(Debug, Clone)]
pub enum TransitionEvent {
    /// A request was dispatched; clears any previous result or error.
    Started,
    /// The request completed; carries the full decoded response body.
    Succeeded(Value),
    /// The request failed; carries a human-readable message.
    Failed(String),
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// Keyed map of [`OperationState`] records, one per [`OperationKey`].
///
/// All keys start Idle. Mutations go through [`transition`](Self::transition)
/// and are confined to the named key's slot.
#[derive(Debug)]
pub struct StateStore {
    slots: HashMap<OperationKey, OperationState>,
}

impl StateStore {
    /// Create a store with every operation Idle.
    pub fn new() -> Self {
        let slots = OperationKey::ALL
            .into_iter()
            .map(|key| (key, OperationState::default()))
            .collect();
        Self { slots }
    }

    /// Apply `event` to `key`'s slot. Other slots are untouched.
    pub fn transition(&mut self, key: OperationKey, event: TransitionEvent) {
        let slot = self.slots.entry(key).or_default();
        *slot = match event {
            TransitionEvent::Started => OperationState {
                status: OperationStatus::Pending,
                result: None,
                error: None,
            },
            TransitionEvent::Succeeded(body) => OperationState {
                status: OperationStatus::Succeeded,
                result: Some(body),
                error: None,
            },
            TransitionEvent::Failed(message) => OperationState {
                status: OperationStatus::Failed,
                result: None,
                error: Some(message),
            },
        };
    }

    /// A side-effect-free copy of `key`'s current record.
    pub fn snapshot(&self, key: OperationKey) -> OperationState {
        self.slots.get(&key).cloned().unwrap_or_default()
    }

    /// Returns `true` while `key` has a request in flight.
    pub fn is_pending(&self, key: OperationKey) -> bool {
        self.snapshot(key).status.is_busy()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SharedStore
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`StateStore`].
///
/// Cheap to clone (`Arc` clone). Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedStore = Arc<Mutex<StateStore>>;

/// Construct a new [`SharedStore`] with every operation Idle.
pub fn new_shared_store() -> SharedStore {
    Arc::new(Mutex::new(StateStore::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

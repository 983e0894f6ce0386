//! # State Store
//!
//! Keyed container for per-endpoint runtime state. Every operation locks the
//! map once, so a reader never sees half of a transition, and entries for
//! different ids never touch each other.

use crate::engine::models::{EndpointRuntimeState, InvocationResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct StateStore {
    states: Mutex<HashMap<String, EndpointRuntimeState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Updates never leave an entry half written, so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, EndpointRuntimeState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the state for `id`, or the default state if it was never touched
    pub fn snapshot(&self, id: &str) -> EndpointRuntimeState {
        self.lock().get(id).cloned().unwrap_or_default()
    }

    /// Flip the expansion flag and return the new value
    pub fn toggle_expansion(&self, id: &str) -> bool {
        let mut states = self.lock();
        let state = states.entry(id.to_string()).or_default();
        state.expanded = !state.expanded;
        state.expanded
    }

    /// Mark `id` as loading and drop the stale result
    pub fn begin_invocation(&self, id: &str) {
        let mut states = self.lock();
        let state = states.entry(id.to_string()).or_default();
        state.loading = true;
        state.last_result = None;
    }

    /// Store the settled result and leave the loading state
    pub fn complete_invocation(&self, id: &str, result: InvocationResult) {
        let mut states = self.lock();
        let state = states.entry(id.to_string()).or_default();
        state.last_result = Some(result);
        state.loading = false;
    }

    /// Leave the loading state without a result
    pub fn abandon_invocation(&self, id: &str) {
        if let Some(state) = self.lock().get_mut(id) {
            state.loading = false;
        }
    }

    /// Number of ids that have been interacted with
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

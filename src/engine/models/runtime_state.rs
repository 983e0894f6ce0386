//! Per-endpoint runtime state
//!
//! One record per endpoint id, created on first interaction and discarded
//! with the engine. Nothing here is persisted.

use super::invocation_result::InvocationResult;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointRuntimeState {
    /// Whether the details (parameters, notes, result) are shown
    pub expanded: bool,
    /// True strictly between dispatch and settlement of an invocation
    pub loading: bool,
    /// Result of the most recently settled invocation
    pub last_result: Option<InvocationResult>,
}

impl EndpointRuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_result(&self) -> bool {
        self.last_result.is_some()
    }
}

//! # Engine Events
//!
//! Notifications emitted when the runtime state of an endpoint changes, for
//! rendering layers that redraw on change instead of polling.

use crate::engine::models::InvocationResult;

/// Capacity of the broadcast channel; slow subscribers skip older events
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events emitted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Expansion flag flipped
    ExpansionToggled { id: String, expanded: bool },

    /// An invocation was dispatched, loading is now true
    InvocationStarted { id: String, url: String },

    /// An invocation settled, loading is now false
    InvocationSettled { id: String, result: InvocationResult },
}

impl EngineEvent {
    /// Endpoint id the event refers to
    pub fn id(&self) -> &str {
        match self {
            EngineEvent::ExpansionToggled { id, .. }
            | EngineEvent::InvocationStarted { id, .. }
            | EngineEvent::InvocationSettled { id, .. } => id,
        }
    }
}

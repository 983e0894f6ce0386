//! Invocation result model
//!
//! The normalized outcome of one live call. A received response and a
//! transport failure are kept apart: the first always carries a parsed body,
//! the second always carries an error message, never both.

use serde::Serialize;
use serde_json::Value;

/// Status code reserved for "no response was received"
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Status text reported alongside [`NETWORK_ERROR_STATUS`]
pub const NETWORK_ERROR_TEXT: &str = "Network Error";

/// What came back from an invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultPayload {
    /// Parsed JSON body of a received response
    Body(Value),
    /// Description of why no response reached us
    TransportError(String),
}

/// Outcome of a completed invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationResult {
    pub status: u16,
    pub status_text: String,
    pub succeeded: bool,
    pub payload: ResultPayload,
}

impl InvocationResult {
    /// Build a result from a response that was received, whatever its status
    pub fn from_response(status: u16, status_text: impl Into<String>, body: Value) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            succeeded: is_ok_status(status),
            payload: ResultPayload::Body(body),
        }
    }

    /// Build a result for a call that never produced a response
    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            status: NETWORK_ERROR_STATUS,
            status_text: NETWORK_ERROR_TEXT.to_string(),
            succeeded: false,
            payload: ResultPayload::TransportError(message.into()),
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match &self.payload {
            ResultPayload::Body(body) => Some(body),
            ResultPayload::TransportError(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.payload {
            ResultPayload::Body(_) => None,
            ResultPayload::TransportError(message) => Some(message),
        }
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self.payload, ResultPayload::TransportError(_))
    }
}

/// 2xx and 3xx count as success
fn is_ok_status(status: u16) -> bool {
    (200..400).contains(&status)
}

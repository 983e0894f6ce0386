//! # Models Module
//!
//! Data types shared by the engine, its services and the rendering layer.

pub mod endpoint;
pub mod invocation_result;
pub mod runtime_state;

pub use endpoint::{EndpointDescriptor, HttpMethod, Parameter};
pub use invocation_result::{
    InvocationResult, ResultPayload, NETWORK_ERROR_STATUS, NETWORK_ERROR_TEXT,
};
pub use runtime_state::EndpointRuntimeState;

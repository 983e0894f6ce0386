//! # Endpoint Engine
//!
//! The interactive core of apidock:
//!
//! ```text
//! ┌──────────────┐   toggle / invoke   ┌────────────────┐   GET    ┌─────────────┐
//! │  REPL / CLI  │────────────────────►│ EndpointEngine │─────────►│ HttpService │
//! │  (renderer)  │◄────────────────────│  StateStore    │◄─────────│             │
//! └──────────────┘  get_state / events └────────────────┘  result  └─────────────┘
//! ```

pub mod core;
pub mod events;
pub mod models;
pub mod services;
pub mod state_store;

pub use self::core::EndpointEngine;
pub use events::EngineEvent;
pub use models::{
    EndpointDescriptor, EndpointRuntimeState, HttpMethod, InvocationResult, Parameter,
    ResultPayload,
};
pub use services::{ClipboardService, HttpService, MemoryClipboard};
pub use state_store::StateStore;

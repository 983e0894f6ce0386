//! # apidock - Terminal API Documentation and Live Tester
//!
//! Browse a catalog of HTTP endpoints, inspect their parameters and invoke
//! them live, reading the raw JSON response inline.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  descriptors  ┌────────────────┐   GET    ┌─────────────┐
//! │   Catalog   │──────────────►│ EndpointEngine │─────────►│ HttpService │
//! │   (INI)     │               │                │◄─────────│             │
//! └─────────────┘               │ - expansion    │  result  └─────────────┘
//!                               │ - loading      │
//! ┌─────────────┐  toggle/try   │ - last result  │
//! │ REPL / CLI  │──────────────►│                │
//! │ + render    │◄──────────────│                │
//! └─────────────┘ state/events  └────────────────┘
//! ```
//!
//! The engine never fails an interaction: network problems become results
//! with status 0, and clipboard problems only reach the log.

pub mod catalog;
pub mod cmd_args;
pub mod config;
pub mod engine;
pub mod render;
pub mod repl;

// Re-export main types for easy access
pub use catalog::Catalog;
pub use config::HttpSettings;
pub use engine::{
    ClipboardService, EndpointDescriptor, EndpointEngine, EndpointRuntimeState, EngineEvent,
    HttpMethod, InvocationResult,
};

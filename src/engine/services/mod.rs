//! # Services Layer
//!
//! Services wrap the external resources the engine talks to:
//! the network for invocations and the host clipboard for copies.

pub mod clipboard;
pub mod http;

// Re-export service types
pub use clipboard::{ClipboardBackend, ClipboardService, MemoryClipboard, SystemClipboard};
pub use http::HttpService;

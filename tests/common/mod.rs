//! Common test utilities and infrastructure
//!
//! Shared functionality for the cucumber suite:
//! - Cucumber world implementation
//! - Mock API server helpers

pub mod world;

// Re-export commonly used items
#[allow(unused_imports)]
pub use world::ApidockWorld;

//! Step definitions for Cucumber tests
//!
//! Steps are organized by feature domain:
//! - `catalog` - Catalog registration and expansion state
//! - `invocation` - Live requests and their results
//! - `clipboard` - Copying endpoint URLs

pub mod clipboard;
pub mod invocation;

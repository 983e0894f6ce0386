//! # Clipboard Service
//!
//! Best-effort copy of text to the host clipboard. Failures are logged and
//! dropped; callers never learn whether a copy worked.

use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};

/// Trait for clipboard implementations
pub trait ClipboardBackend: Send + Sync {
    /// Replace the clipboard content with `text`
    fn set_text(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`
///
/// A fresh handle is opened per copy so a missing display at startup does not
/// disable copying for the whole session.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| anyhow::anyhow!("Failed to access system clipboard: {}", e))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to set clipboard text: {}", e))
    }
}

/// In-memory clipboard for headless sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text, if any
    pub fn content(&self) -> Option<String> {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        tracing::debug!("Copying {} characters to memory clipboard", text.len());
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

/// Service for copying text, never fails towards its caller
pub struct ClipboardService {
    backend: Box<dyn ClipboardBackend>,
}

impl ClipboardService {
    pub fn new(backend: Box<dyn ClipboardBackend>) -> Self {
        Self { backend }
    }

    /// Service writing to the system clipboard
    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard))
    }

    /// Service writing to the given in-memory clipboard
    pub fn memory(clipboard: MemoryClipboard) -> Self {
        Self::new(Box::new(clipboard))
    }

    /// Copy `value`; a failure only shows up in the log
    pub fn copy_text(&self, value: &str) {
        match self.backend.set_text(value) {
            Ok(()) => tracing::debug!("Copied {} characters to clipboard", value.len()),
            Err(e) => tracing::error!("Failed to copy: {}", e),
        }
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::system()
    }
}

//! Configuration constants and utilities for apidock
//!
//! Catalog path resolution and the settings handed to the HTTP service.

use std::time::Duration;

/// Default catalog file path for apidock
pub const DEFAULT_CATALOG_PATH: &str = "~/.apidock/catalog.ini";

/// Environment variable name for overriding the catalog path
pub const CATALOG_PATH_ENV_VAR: &str = "APIDOCK_CATALOG_PATH";

/// Environment variable holding the log filter for the binary
pub const LOG_LEVEL_ENV_VAR: &str = "APIDOCK_LOG_LEVEL";

/// Get the catalog file path, checking environment variable first, then falling back to default
pub fn get_catalog_path() -> String {
    std::env::var_os(CATALOG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
}

/// Expand a leading `~` and `$VARS` in a user supplied path
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|e| {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            path.to_string()
        })
}

/// Settings for the outbound HTTP client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpSettings {
    /// Overall request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl HttpSettings {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Combine settings, values from `other` win
    pub fn merged_with(&self, other: &HttpSettings) -> HttpSettings {
        HttpSettings {
            timeout: other.timeout.or(self.timeout),
        }
    }
}

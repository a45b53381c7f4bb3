//! Error types for browser automation.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors raised while driving the browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The underlying Chromium process or CDP call failed
    #[error("chromium error: {0}")]
    ChromiumError(String),

    /// Navigation did not complete
    #[error("navigation failed: {0}")]
    NavigationError(String),

    /// A required selector matched nothing
    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    /// A wait expired before its condition held
    #[error("timeout: {0}")]
    Timeout(String),

    /// The profile directory is held by another live process
    #[error("profile directory already in use: {}", .0.display())]
    ProfileLocked(PathBuf),

    /// Filesystem failure around the profile directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

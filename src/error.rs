//! Error types and handling infrastructure for logsift.
//!
//! This module provides a centralized error type built with `thiserror`. The binary wraps it in
//! `anyhow` at the very top; everything inside the library returns [`Result`].
//!
//! ## Propagation
//!
//! - **Source errors** (open/read) are reported and the driver continues with the next path
//! - **Render and input errors** are reported and the session keeps running or quits cleanly
//! - **Screen initialization errors** are the only ones that terminate the process

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for logsift operations.
#[derive(Error, Debug)]
pub enum LogsiftError {
    /// The path could not be opened as a readable regular file
    #[error("Failed to open {}: {source}", .path.display())]
    SourceOpenFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading stopped part-way through the source for a reason other than end of input
    #[error("Failed to read {}: {source}", .path.display())]
    SourceReadFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The terminal could not be acquired or put into full-screen mode
    #[error("Terminal initialization failed: {message}")]
    ScreenInitFailure { message: String },

    /// Writing a frame to the screen failed
    #[error("Render failed: {message}")]
    RenderFailure { message: String },

    /// The terminal event source failed while waiting for input
    #[error("Input failed: {message}")]
    InputFailure { message: String },

    /// An operation was attempted on a session that has already quit
    #[error("Session already closed")]
    SessionClosed,
}

/// Standard Result type for logsift operations.
pub type Result<T> = std::result::Result<T, LogsiftError>;

impl LogsiftError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceOpenFailure {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceReadFailure {
            path: path.into(),
            source,
        }
    }

    pub fn screen_init(message: impl Into<String>) -> Self {
        Self::ScreenInitFailure {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderFailure {
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::InputFailure {
            message: message.into(),
        }
    }

    /// Whether the driver must stop processing further paths after this error.
    ///
    /// A lost terminal cannot serve later paths either, and `SessionClosed` means the event loop
    /// itself is broken.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ScreenInitFailure { .. } | Self::SessionClosed)
    }
}

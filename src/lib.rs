//! # logsift - Terminal Log Triage
//!
//! Splits log files into ERROR, INFO and WARN views and lets an operator flip between them with
//! single keys in a full-screen terminal session.
//!
//! ## Architecture
//!
//! - [`classify`] - Substring classification of lines into severity buckets
//! - [`source`] - Opening log files and splitting them into raw lines
//! - [`session`] - Per-file session owning the buckets and the active view
//! - [`input`] - Mapping of terminal events to session actions
//! - [`render`] - Screen capability traits, the bucket renderer and the crossterm terminal
//! - [`app`] - The interactive event loop and the per-path driver
//! - [`error`] - Centralized error types

pub mod error;

pub mod classify;
pub mod source;

pub mod input;
pub mod render;
pub mod session;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{LogsiftError, Result};

pub use app::{run_paths, run_session, RunSummary, SessionReport};
pub use classify::{classify, Bucket, BucketId, Buckets, LogLine, Severity};
pub use session::{Session, SessionState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

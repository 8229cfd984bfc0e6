//! Per-source viewing session.
//!
//! A [`Session`] exists only after the terminal has been set up, so it starts out
//! [`SessionState::Active`] and can only move to [`SessionState::Finalized`].

use crate::classify::{Bucket, BucketId, Buckets};
use crate::error::{LogsiftError, Result};
use std::path::{Path, PathBuf};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finalized,
}

/// Owns the classified buckets of one source and the active-bucket selector.
#[derive(Debug)]
pub struct Session {
    source: PathBuf,
    buckets: Buckets,
    active: BucketId,
    state: SessionState,
}

impl Session {
    pub fn new(source: impl Into<PathBuf>, buckets: Buckets) -> Self {
        Self {
            source: source.into(),
            buckets,
            active: BucketId::All,
            state: SessionState::Active,
        }
    }

    /// Make `id` the active bucket.
    ///
    /// Returns `true` if the selection changed. Fails with `SessionClosed` after [`quit`](Self::quit).
    pub fn select(&mut self, id: BucketId) -> Result<bool> {
        if self.state == SessionState::Finalized {
            return Err(LogsiftError::SessionClosed);
        }
        let changed = self.active != id;
        self.active = id;
        Ok(changed)
    }

    /// Finalize the session. Calling it again has no effect.
    pub fn quit(&mut self) {
        self.state = SessionState::Finalized;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    pub fn active(&self) -> BucketId {
        self.active
    }

    pub fn active_bucket(&self) -> &Bucket {
        self.buckets.get(self.active)
    }

    pub fn bucket(&self, id: BucketId) -> &Bucket {
        self.buckets.get(id)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for acquiring and releasing slots

use slotlock_adapters::StoreError;
use slotlock_core::{ConfigError, RecordError};
use thiserror::Error;

/// Errors surfaced by lock operations.
///
/// A full pool is not an error; acquire reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("invalid lock configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid occupant record: {0}")]
    Record(#[from] RecordError),
}

impl LockError {
    /// True when the store could not be reached; the caller may retry
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, LockError::Store(e) if e.is_unavailable())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unique token generation
//!
//! Every claim is stamped with a fresh token. Tokens must be unique across
//! all processes sharing a store; production tokens are UUID v7 so their
//! creation time can be read back when judging stale holders.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::{Uuid, Version};

/// Generates unique tokens
pub trait TokenGen: Clone + Send + Sync + 'static {
    fn next_token(&self) -> String;
}

/// Time-ordered UUID v7 tokens for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidV7TokenGen;

impl TokenGen for UuidV7TokenGen {
    fn next_token(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Sequential token generator for testing
#[derive(Clone, Debug)]
pub struct SequentialTokenGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialTokenGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialTokenGen {
    fn default() -> Self {
        Self::new("token")
    }
}

impl TokenGen for SequentialTokenGen {
    fn next_token(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

/// Creation time of a UUID v7 token, millisecond precision.
///
/// Returns `None` for anything that is not a v7 UUID.
pub fn issued_at(token: &str) -> Option<DateTime<Utc>> {
    let uuid = Uuid::parse_str(token).ok()?;
    if uuid.get_version() != Some(Version::SortRand) {
        return None;
    }
    let (secs, nanos) = uuid.get_timestamp()?.to_unix();
    DateTime::from_timestamp(i64::try_from(secs).ok()?, nanos)
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;

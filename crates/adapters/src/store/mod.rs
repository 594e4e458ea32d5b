// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared store adapters
//!
//! A pool lives in the store as a hash keyed by the pool name, mapping
//! decimal slot numbers to occupant records. Claim and release must run
//! atomically on the store side; reads are plain field lookups.

mod redis;

pub use self::redis::{RedisSlotStore, RedisStoreConfig};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSlotStore, StoreCall};

use async_trait::async_trait;
use slotlock_core::{Capacity, PoolName, SlotNumber};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection or transport failure; nothing is known about store state
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store answered, but not with a reply this protocol can use
    #[error("unexpected store reply: {0}")]
    Protocol(String),
    /// The adapter could not be constructed from its settings
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Adapter for the shared key-value store that arbitrates slot ownership
#[async_trait]
pub trait SlotStore: Clone + Send + Sync + 'static {
    /// Atomically write `record` under the lowest free slot in `1..=capacity`.
    ///
    /// Returns the claimed slot number, or 0 when every slot is occupied.
    async fn claim(
        &self,
        pool: &PoolName,
        capacity: Capacity,
        record: &[u8],
    ) -> Result<u32, StoreError>;

    /// Atomically remove the entry for `slot`, whoever holds it.
    ///
    /// Returns the number of entries removed (0 if the slot was already free).
    async fn release(&self, pool: &PoolName, slot: SlotNumber) -> Result<u32, StoreError>;

    /// Read the occupant record stored under `slot`
    async fn read_slot(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Read every occupied slot of a pool
    async fn occupancy(&self, pool: &PoolName)
        -> Result<BTreeMap<SlotNumber, Vec<u8>>, StoreError>;
}

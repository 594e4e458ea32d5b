// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acquire entry point

use crate::allocator::{Claim, SlotAllocator};
use crate::error::LockError;
use crate::handle::LockHandle;
use slotlock_adapters::SlotStore;
use slotlock_core::{
    Clock, InfoPayload, LockConfig, OccupantRecord, SystemClock, TokenGen, UuidV7TokenGen,
};

/// A configured lock over one pool.
///
/// Each [`try_acquire`](Self::try_acquire) mints a fresh token, so one
/// `SlotLock` can hand out several handles to the same process.
pub struct SlotLock<S, T = UuidV7TokenGen, C = SystemClock> {
    config: LockConfig,
    allocator: SlotAllocator<S>,
    tokens: T,
    clock: C,
}

impl<S: SlotStore> SlotLock<S> {
    pub fn new(store: S, config: LockConfig) -> Self {
        Self::with_deps(store, config, UuidV7TokenGen, SystemClock)
    }
}

impl<S, T, C> SlotLock<S, T, C>
where
    S: SlotStore,
    T: TokenGen,
    C: Clock,
{
    /// Create a lock with explicit token and clock sources
    pub fn with_deps(store: S, config: LockConfig, tokens: T, clock: C) -> Self {
        Self {
            config,
            allocator: SlotAllocator::new(store),
            tokens,
            clock,
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn allocator(&self) -> &SlotAllocator<S> {
        &self.allocator
    }

    /// Claim a slot.
    ///
    /// Returns `Ok(None)` when the pool is full. Store failures are errors,
    /// and no handle is created.
    pub async fn try_acquire(&self) -> Result<Option<LockHandle<S>>, LockError> {
        let LockConfig {
            pool,
            capacity,
            info,
        } = &self.config;

        let record = OccupantRecord::new(self.tokens.next_token(), info.render(&self.clock))?;

        match self.allocator.claim(pool, *capacity, &record).await? {
            Claim::Granted(slot) => {
                tracing::debug!(pool = %pool, slot = slot.get(), token = record.token(), "acquired");
                Ok(Some(LockHandle::new(
                    self.allocator.clone(),
                    pool.clone(),
                    *capacity,
                    slot,
                    record,
                )))
            }
            Claim::PoolFull => {
                tracing::debug!(pool = %pool, capacity = capacity.get(), "pool full");
                Ok(None)
            }
        }
    }
}

/// Validate the settings and claim a slot with production tokens and clock
pub async fn acquire<S: SlotStore>(
    store: S,
    pool: &str,
    capacity: u32,
    info: impl Into<InfoPayload>,
) -> Result<Option<LockHandle<S>>, LockError> {
    let config = LockConfig::new(pool, capacity)?.with_info(info);
    SlotLock::new(store, config).try_acquire().await
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock handle: one held slot
//!
//! A handle only exists after a successful claim. While it is bound to a
//! slot, the store is expected to hold its exact occupant record under that
//! slot. Nothing prevents an outside writer from breaking that; `verify`
//! detects it.

use crate::allocator::SlotAllocator;
use crate::error::LockError;
use slotlock_adapters::{SlotStore, StoreError};
use slotlock_core::{Capacity, OccupantRecord, PoolName, SlotNumber};

/// Result of re-reading a handle's occupant record
#[derive(Debug, Clone)]
pub enum Ownership {
    /// The stored record is byte-for-byte ours
    Held,
    /// The slot is free or holds someone else's record
    Lost,
    /// The store could not be read
    Unconfirmed(StoreError),
}

impl Ownership {
    pub fn is_held(&self) -> bool {
        matches!(self, Ownership::Held)
    }
}

/// A claimed slot in a pool.
///
/// Dropping the handle releases the slot if it is still bound. Drop cannot
/// wait for the store, so the release is spawned onto the current tokio
/// runtime and any failure is only logged. Outside a runtime, or if the
/// process dies first, the record stays in the store.
///
/// A claim can also leave a record with no handle at all: if the store runs
/// the claim but the reply is lost or times out, acquire reports
/// `Unavailable` while the slot is already occupied under a token nobody
/// holds. Both cases are stale locks that only `reclaim` clears.
pub struct LockHandle<S: SlotStore> {
    allocator: SlotAllocator<S>,
    pool: PoolName,
    capacity: Capacity,
    slot: Option<SlotNumber>,
    record: OccupantRecord,
}

impl<S: SlotStore> LockHandle<S> {
    pub(crate) fn new(
        allocator: SlotAllocator<S>,
        pool: PoolName,
        capacity: Capacity,
        slot: SlotNumber,
        record: OccupantRecord,
    ) -> Self {
        Self {
            allocator,
            pool,
            capacity,
            slot: Some(slot),
            record,
        }
    }

    pub fn pool(&self) -> &PoolName {
        &self.pool
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Bound slot, `None` once released
    pub fn slot(&self) -> Option<SlotNumber> {
        self.slot
    }

    pub fn token(&self) -> &str {
        self.record.token()
    }

    pub fn info(&self) -> &str {
        self.record.info()
    }

    pub fn record(&self) -> &OccupantRecord {
        &self.record
    }

    /// Re-read the bound slot and compare it with our record.
    ///
    /// Never writes to the store and never releases.
    pub async fn verify(&self) -> Ownership {
        let Some(slot) = self.slot else {
            return Ownership::Lost;
        };

        match self.allocator.read(&self.pool, slot).await {
            Ok(Some(stored)) if self.record.matches(&stored) => Ownership::Held,
            Ok(stored) => {
                tracing::warn!(
                    pool = %self.pool,
                    slot = slot.get(),
                    occupied = stored.is_some(),
                    "slot ownership lost"
                );
                Ownership::Lost
            }
            Err(e) => {
                tracing::warn!(
                    pool = %self.pool,
                    slot = slot.get(),
                    error = %e,
                    "could not confirm slot ownership"
                );
                Ownership::Unconfirmed(e)
            }
        }
    }

    /// `true` only when ownership is confirmed
    pub async fn heartbeat(&self) -> bool {
        self.verify().await.is_held()
    }

    /// Release the bound slot.
    ///
    /// A second call is a no-op. On a store error the binding is kept, so
    /// the call may be retried; drop makes one more attempt otherwise.
    pub async fn release(&mut self) -> Result<(), LockError> {
        let Some(slot) = self.slot else {
            return Ok(());
        };

        let released = self.allocator.release(&self.pool, slot).await?;
        tracing::debug!(pool = %self.pool, slot = slot.get(), ?released, "released");
        self.slot = None;
        Ok(())
    }

    /// Give up the binding without touching the store.
    ///
    /// For a holder that learned its slot now belongs to someone else, where
    /// releasing would delete the new holder's record.
    pub fn abandon(mut self) {
        if let Some(slot) = self.slot.take() {
            tracing::debug!(pool = %self.pool, slot = slot.get(), "abandoned slot binding");
        }
    }
}

impl<S: SlotStore> Drop for LockHandle<S> {
    fn drop(&mut self) {
        let Some(slot) = self.slot.take() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                pool = %self.pool,
                slot = slot.get(),
                "no async runtime to release slot, leaving it occupied"
            );
            return;
        };

        let allocator = self.allocator.clone();
        let pool = self.pool.clone();
        runtime.spawn(async move {
            match allocator.release(&pool, slot).await {
                Ok(released) => {
                    tracing::debug!(pool = %pool, slot = slot.get(), ?released, "released on drop")
                }
                Err(e) => tracing::warn!(
                    pool = %pool,
                    slot = slot.get(),
                    error = %e,
                    "release on drop failed, slot stays occupied"
                ),
            }
        });
    }
}

impl<S: SlotStore> std::fmt::Debug for LockHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockHandle")
            .field("pool", &self.pool)
            .field("capacity", &self.capacity)
            .field("slot", &self.slot)
            .field("record", &self.record)
            .finish()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;

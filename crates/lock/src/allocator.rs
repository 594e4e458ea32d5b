// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slot allocator: atomic claim and release over a [`SlotStore`]
//!
//! All mutual exclusion happens inside the store. The allocator only turns
//! the store's integer replies into typed outcomes and rejects replies that
//! break the protocol.

use slotlock_adapters::{SlotStore, StoreError};
use slotlock_core::{Capacity, OccupantRecord, PoolName, RecordError, SlotNumber};
use std::collections::BTreeMap;

/// Outcome of a claim
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    Granted(SlotNumber),
    /// Every slot in `1..=capacity` is occupied
    PoolFull,
}

/// Outcome of a release
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Released {
    Freed,
    AlreadyFree,
}

/// One occupied slot as read back from the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub slot: SlotNumber,
    /// Stored value, byte for byte
    pub raw: Vec<u8>,
    /// Decoded record, or why the value could not be decoded
    pub record: Result<OccupantRecord, RecordError>,
}

/// Claims and releases slots of any pool in one store
#[derive(Clone)]
pub struct SlotAllocator<S> {
    store: S,
}

impl<S: SlotStore> SlotAllocator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write `record` under the lowest free slot of `pool`.
    ///
    /// A full pool is a normal outcome. Store failures propagate unchanged.
    pub async fn claim(
        &self,
        pool: &PoolName,
        capacity: Capacity,
        record: &OccupantRecord,
    ) -> Result<Claim, StoreError> {
        let reply = self
            .store
            .claim(pool, capacity, &record.to_bytes())
            .await?;

        let Some(slot) = SlotNumber::new(reply) else {
            return Ok(Claim::PoolFull);
        };
        if !capacity.contains(slot) {
            return Err(StoreError::Protocol(format!(
                "claim on pool {} returned slot {} beyond capacity {}",
                pool,
                slot,
                capacity.get()
            )));
        }
        Ok(Claim::Granted(slot))
    }

    /// Remove whatever record occupies `slot`, without checking who holds it
    pub async fn release(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Released, StoreError> {
        match self.store.release(pool, slot).await? {
            0 => Ok(Released::AlreadyFree),
            _ => Ok(Released::Freed),
        }
    }

    /// Raw record stored under `slot`, `None` if the slot is free
    pub async fn read(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        self.store.read_slot(pool, slot).await
    }

    /// Every occupied slot of `pool`, ascending, with records decoded
    pub async fn occupants(&self, pool: &PoolName) -> Result<Vec<Occupant>, StoreError> {
        let slots: BTreeMap<SlotNumber, Vec<u8>> = self.store.occupancy(pool).await?;
        Ok(slots
            .into_iter()
            .map(|(slot, raw)| Occupant {
                slot,
                record: OccupantRecord::from_bytes(&raw),
                raw,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;

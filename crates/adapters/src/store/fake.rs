// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake slot store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SlotStore, StoreError};
use async_trait::async_trait;
use slotlock_core::{first_free_slot, Capacity, PoolName, SlotNumber};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Claim {
        pool: String,
        capacity: u32,
        record: Vec<u8>,
    },
    Release {
        pool: String,
        slot: u32,
    },
    ReadSlot {
        pool: String,
        slot: u32,
    },
    Occupancy {
        pool: String,
    },
}

type Pools = HashMap<String, BTreeMap<SlotNumber, Vec<u8>>>;

/// In-memory slot store with the same hash semantics as the real one.
///
/// A mutex stands in for the store's atomic script execution. Records can
/// be written or removed behind the allocator's back to play an external
/// actor, and the whole store can be switched "offline".
#[derive(Clone, Default)]
pub struct FakeSlotStore {
    pools: Arc<Mutex<Pools>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    unavailable: Arc<AtomicBool>,
}

impl FakeSlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Simulate losing (or regaining) the connection to the store
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Raw record stored under `slot`, if any
    pub fn record(&self, pool: &str, slot: u32) -> Option<Vec<u8>> {
        let slot = SlotNumber::new(slot)?;
        self.pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(pool)
            .and_then(|slots| slots.get(&slot))
            .cloned()
    }

    /// Occupied slot numbers of a pool, ascending
    pub fn occupied(&self, pool: &str) -> Vec<u32> {
        self.pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(pool)
            .map(|slots| slots.keys().map(|s| s.get()).collect())
            .unwrap_or_default()
    }

    /// Whether the pool hash exists at all (it vanishes with its last field)
    pub fn contains_pool(&self, pool: &str) -> bool {
        self.pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(pool)
    }

    /// Overwrite a slot's record directly, bypassing the claim protocol
    pub fn put_record(&self, pool: &str, slot: u32, record: impl Into<Vec<u8>>) {
        let Some(slot) = SlotNumber::new(slot) else {
            return;
        };
        self.pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(pool.to_string())
            .or_default()
            .insert(slot, record.into());
    }

    /// Delete a slot's record directly, bypassing the release protocol
    pub fn remove_record(&self, pool: &str, slot: u32) {
        let Some(slot) = SlotNumber::new(slot) else {
            return;
        };
        let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
        remove_field(&mut pools, pool, slot);
    }

    fn record_call(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "fake store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn remove_field(pools: &mut Pools, pool: &str, slot: SlotNumber) -> bool {
    let Some(slots) = pools.get_mut(pool) else {
        return false;
    };
    let removed = slots.remove(&slot).is_some();
    if slots.is_empty() {
        pools.remove(pool);
    }
    removed
}

#[async_trait]
impl SlotStore for FakeSlotStore {
    async fn claim(
        &self,
        pool: &PoolName,
        capacity: Capacity,
        record: &[u8],
    ) -> Result<u32, StoreError> {
        self.record_call(StoreCall::Claim {
            pool: pool.to_string(),
            capacity: capacity.get(),
            record: record.to_vec(),
        });
        self.check_available()?;

        let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
        let slots = pools.get(pool.as_str());
        let free = first_free_slot(capacity, |slot| {
            slots.is_some_and(|slots| slots.contains_key(&slot))
        });

        match free {
            Some(slot) => {
                pools
                    .entry(pool.to_string())
                    .or_default()
                    .insert(slot, record.to_vec());
                Ok(slot.get())
            }
            None => Ok(0),
        }
    }

    async fn release(&self, pool: &PoolName, slot: SlotNumber) -> Result<u32, StoreError> {
        self.record_call(StoreCall::Release {
            pool: pool.to_string(),
            slot: slot.get(),
        });
        self.check_available()?;

        let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
        Ok(u32::from(remove_field(&mut pools, pool.as_str(), slot)))
    }

    async fn read_slot(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        self.record_call(StoreCall::ReadSlot {
            pool: pool.to_string(),
            slot: slot.get(),
        });
        self.check_available()?;

        Ok(self.record(pool.as_str(), slot.get()))
    }

    async fn occupancy(
        &self,
        pool: &PoolName,
    ) -> Result<BTreeMap<SlotNumber, Vec<u8>>, StoreError> {
        self.record_call(StoreCall::Occupancy {
            pool: pool.to_string(),
        });
        self.check_available()?;

        Ok(self
            .pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(pool.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

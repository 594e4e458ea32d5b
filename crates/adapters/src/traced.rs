// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::store::{SlotStore, StoreError};
use async_trait::async_trait;
use slotlock_core::{Capacity, PoolName, SlotNumber};
use std::collections::BTreeMap;
use tracing::Instrument;

/// Wrapper that adds tracing to any SlotStore
#[derive(Clone)]
pub struct TracedSlotStore<S> {
    inner: S,
}

impl<S> TracedSlotStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: SlotStore> SlotStore for TracedSlotStore<S> {
    async fn claim(
        &self,
        pool: &PoolName,
        capacity: Capacity,
        record: &[u8],
    ) -> Result<u32, StoreError> {
        let span = tracing::info_span!("store.claim", pool = %pool, capacity = capacity.get());
        async {
            tracing::debug!(record_len = record.len(), "claiming");

            let start = std::time::Instant::now();
            let result = self.inner.claim(pool, capacity, record).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(0) => tracing::info!(elapsed_ms, "pool full"),
                Ok(slot) => tracing::info!(slot, elapsed_ms, "slot claimed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "claim failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn release(&self, pool: &PoolName, slot: SlotNumber) -> Result<u32, StoreError> {
        let span = tracing::info_span!("store.release", pool = %pool, slot = slot.get());
        async {
            let result = self.inner.release(pool, slot).await;
            match &result {
                Ok(0) => tracing::info!("slot already free"),
                Ok(_) => tracing::info!("slot released"),
                Err(e) => tracing::warn!(error = %e, "release failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn read_slot(
        &self,
        pool: &PoolName,
        slot: SlotNumber,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let result = self.inner.read_slot(pool, slot).await;
        tracing::trace!(
            pool = %pool,
            slot = slot.get(),
            found = ?result.as_ref().map(|r| r.is_some()).ok(),
            "read slot"
        );
        result
    }

    async fn occupancy(
        &self,
        pool: &PoolName,
    ) -> Result<BTreeMap<SlotNumber, Vec<u8>>, StoreError> {
        let result = self.inner.occupancy(pool).await;
        tracing::debug!(
            pool = %pool,
            occupied = result.as_ref().map(|m| m.len()).ok(),
            "read occupancy"
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

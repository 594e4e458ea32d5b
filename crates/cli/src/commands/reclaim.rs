// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `slotlock reclaim <pool> <slot>` - Free a slot left behind by a dead holder
//!
//! This is an unconditional release. It does not check who holds the slot,
//! so a live holder loses it and will notice only on its next heartbeat.

use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use slotlock::{Released, SlotAllocator};
use slotlock_adapters::SlotStore;
use slotlock_core::{Clock, OccupantRecord, PoolName, SlotNumber};
use std::fmt;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ReclaimArgs {
    /// Pool holding the slot
    pub pool: String,

    /// Slot number to free
    pub slot: SlotNumber,

    /// Only reclaim if the holder's token is older than this (e.g. 1h)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub older_than: Option<Duration>,

    /// Skip the age check
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct ReclaimOutcome {
    pub pool: String,
    pub slot: u32,
    pub freed: bool,
}

impl fmt::Display for ReclaimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.freed {
            write!(f, "Released slot {} in pool '{}'", self.slot, self.pool)
        } else {
            write!(f, "Slot {} in pool '{}' is already free", self.slot, self.pool)
        }
    }
}

/// Refuse unless the current holder's token is at least `threshold` old
async fn check_age<S: SlotStore>(
    allocator: &SlotAllocator<S>,
    pool: &PoolName,
    slot: SlotNumber,
    threshold: Duration,
    clock: &impl Clock,
) -> Result<()> {
    let Some(raw) = allocator.read(pool, slot).await? else {
        return Ok(());
    };

    let age = OccupantRecord::from_bytes(&raw)
        .ok()
        .and_then(|record| record.issued_at())
        .and_then(|issued| clock.now().signed_duration_since(issued).to_std().ok())
        .ok_or_else(|| CliError::holder_age_unknown(pool.as_str(), slot.get()))?;

    if age < threshold {
        return Err(CliError::holder_too_young(pool.as_str(), slot.get(), age, threshold).into());
    }
    Ok(())
}

pub async fn handle<S: SlotStore>(
    args: ReclaimArgs,
    store: S,
    clock: &impl Clock,
    format: OutputFormat,
) -> Result<()> {
    let pool = PoolName::new(args.pool)?;
    let allocator = SlotAllocator::new(store);

    if let (Some(threshold), false) = (args.older_than, args.force) {
        check_age(&allocator, &pool, args.slot, threshold, clock).await?;
    }

    let released = allocator.release(&pool, args.slot).await?;
    tracing::info!(pool = %pool, slot = args.slot.get(), ?released, "reclaimed");

    output::print(
        &ReclaimOutcome {
            pool: pool.to_string(),
            slot: args.slot.get(),
            freed: released == Released::Freed,
        },
        format,
    );
    Ok(())
}

#[cfg(test)]
#[path = "reclaim_tests.rs"]
mod tests;

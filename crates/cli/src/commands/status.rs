// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `slotlock status <pool>` - Show who holds which slot

use crate::output::{self, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use slotlock::{Occupant, SlotAllocator};
use slotlock_adapters::{SlotStore, StoreError};
use slotlock_core::{Clock, PoolName};
use std::fmt;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Pool to inspect
    pub pool: String,
}

/// One occupied slot, as shown to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub slot: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Seconds since the token was minted, when the token says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_secs: Option<u64>,
    /// Raw value (lossy UTF-8) of a record that could not be decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed: Option<String>,
}

impl SlotStatus {
    fn from_occupant(occupant: Occupant, now: DateTime<Utc>) -> Self {
        match occupant.record {
            Ok(record) => Self {
                slot: occupant.slot.get(),
                age_secs: record
                    .issued_at()
                    .and_then(|issued| now.signed_duration_since(issued).to_std().ok())
                    .map(|age| age.as_secs()),
                token: Some(record.token().to_string()),
                info: Some(record.info().to_string()),
                malformed: None,
            },
            Err(_) => Self {
                slot: occupant.slot.get(),
                token: None,
                info: None,
                age_secs: None,
                malformed: Some(String::from_utf8_lossy(&occupant.raw).into_owned()),
            },
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw) = &self.malformed {
            return write!(f, "{:<6} malformed: {}", self.slot, raw);
        }
        let age = self
            .age_secs
            .map(|secs| humantime::format_duration(Duration::from_secs(secs)).to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:<6} {:<38} {:<12} {}",
            self.slot,
            self.token.as_deref().unwrap_or("-"),
            age,
            self.info.as_deref().unwrap_or("")
        )
    }
}

/// Read and decode every occupied slot of `pool`
pub async fn collect<S: SlotStore>(
    allocator: &SlotAllocator<S>,
    pool: &PoolName,
    now: DateTime<Utc>,
) -> Result<Vec<SlotStatus>, StoreError> {
    Ok(allocator
        .occupants(pool)
        .await?
        .into_iter()
        .map(|occupant| SlotStatus::from_occupant(occupant, now))
        .collect())
}

pub async fn handle<S: SlotStore>(
    args: StatusArgs,
    store: S,
    clock: &impl Clock,
    format: OutputFormat,
) -> Result<()> {
    let pool = PoolName::new(args.pool)?;
    let slots = collect(&SlotAllocator::new(store), &pool, clock.now()).await?;

    output::print_list(
        &slots,
        format,
        &format!("{:<6} {:<38} {:<12} INFO", "SLOT", "TOKEN", "AGE"),
        &format!("No holders in pool '{}'", pool),
    );
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

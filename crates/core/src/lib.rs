// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! slotlock-core: domain types for the slotlock bounded-concurrency lock
//!
//! This crate provides:
//! - Pool, capacity, and slot-number types plus the first-free claim policy
//! - The occupant record codec (`<token>|<info>`)
//! - Token and clock abstractions with deterministic test doubles
//! - Lock and config-file settings

pub mod clock;
pub mod config;
pub mod limits;
pub mod record;
pub mod slot;
pub mod token;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, FileConfig, InfoPayload, LockConfig, LockConfigBuilder};
pub use record::{OccupantRecord, RecordError, RECORD_SEPARATOR};
pub use slot::{first_free_slot, Capacity, InvalidSlotNumber, PoolName, SlotNumber};
pub use token::{SequentialTokenGen, TokenGen, UuidV7TokenGen};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! slotlock: a lock that up to N processes may hold at once
//!
//! Coordination state lives in a shared store, one hash per pool. Each
//! holder owns one slot number in `1..=N` and proves it with an occupant
//! record (`<token>|<info>`) written atomically with the claim.
//!
//! ```no_run
//! # async fn demo() -> Result<(), slotlock::LockError> {
//! use slotlock::{RedisSlotStore, InfoPayload};
//!
//! let store = RedisSlotStore::open("redis://127.0.0.1:6379")?;
//! match slotlock::acquire(store, "builds", 4, InfoPayload::Timestamp).await? {
//!     Some(mut handle) => {
//!         // ... do the work, calling handle.heartbeat() now and then ...
//!         handle.release().await?;
//!     }
//!     None => println!("pool is full"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Dropping a [`LockHandle`] releases its slot on a best-effort basis. A
//! process that dies without running its destructors leaves its record in
//! the store until an operator reclaims the slot.

mod allocator;
mod error;
mod handle;
mod lock;

pub use allocator::{Claim, Occupant, Released, SlotAllocator};
pub use error::LockError;
pub use handle::{LockHandle, Ownership};
pub use lock::{acquire, SlotLock};

pub use slotlock_adapters::{
    RedisSlotStore, RedisStoreConfig, SlotStore, StoreError, TracedSlotStore,
};
pub use slotlock_core::{
    Capacity, Clock, ConfigError, InfoPayload, LockConfig, OccupantRecord, PoolName, RecordError,
    SlotNumber, SystemClock, TokenGen, UuidV7TokenGen,
};

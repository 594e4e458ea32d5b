// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool, capacity, and slot-number types
//!
//! A pool is a named, fixed-capacity set of interchangeable slots numbered
//! `1..=N`. The pool name doubles as the key of the hash that holds the
//! occupant records; slot numbers are its decimal field names.

use crate::config::ConfigError;
use crate::limits::{MAX_CAPACITY, MAX_POOL_NAME_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Name of a slot pool
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PoolName(String);

impl PoolName {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyPoolName);
        }
        if name.len() > MAX_POOL_NAME_LEN {
            return Err(ConfigError::PoolNameTooLong {
                len: name.len(),
                max: MAX_POOL_NAME_LEN,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PoolName {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<PoolName> for String {
    fn from(name: PoolName) -> Self {
        name.0
    }
}

impl AsRef<str> for PoolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maximum number of concurrent holders of a pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(NonZeroU32);

impl Capacity {
    pub fn new(capacity: u32) -> Result<Self, ConfigError> {
        if capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: capacity,
                max: MAX_CAPACITY,
            });
        }
        NonZeroU32::new(capacity)
            .map(Self)
            .ok_or(ConfigError::ZeroCapacity)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Slot numbers of this pool in ascending order
    pub fn slots(self) -> impl Iterator<Item = SlotNumber> {
        (1..=self.get()).filter_map(SlotNumber::new)
    }

    /// Whether `slot` is a valid slot number for this capacity
    pub fn contains(self, slot: SlotNumber) -> bool {
        slot.get() <= self.get()
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ConfigError;

    fn try_from(capacity: u32) -> Result<Self, Self::Error> {
        Self::new(capacity)
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.get()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of admission within a pool, numbered from 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotNumber(NonZeroU32);

impl SlotNumber {
    /// Returns `None` for 0, which the claim body uses as its "pool full" sentinel
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a slot number from a store field name or CLI argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid slot number: {0:?}")]
pub struct InvalidSlotNumber(pub String);

impl FromStr for SlotNumber {
    type Err = InvalidSlotNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Field names are plain decimal: reject "+1", " 1", "01"
        if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidSlotNumber(s.to_string()));
        }
        s.parse::<u32>()
            .ok()
            .and_then(SlotNumber::new)
            .ok_or_else(|| InvalidSlotNumber(s.to_string()))
    }
}

/// Lowest slot number in `1..=capacity` for which `occupied` is false.
///
/// This is the claim policy: ascending first-free packs holders toward low
/// numbers, so a freed slot is the next one handed out.
pub fn first_free_slot(
    capacity: Capacity,
    occupied: impl Fn(SlotNumber) -> bool,
) -> Option<SlotNumber> {
    capacity.slots().find(|slot| !occupied(*slot))
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
